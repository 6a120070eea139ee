/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::hint::black_box;

use num_bigint::BigUint;
use crate::field::Field;

///Internal point representation.
///
///Projective `(X:Y:Z)` for short Weierstrass curves (`t` unused),
///extended `(X:Y:Z:T)` with `T = XY/Z` for twisted Edwards curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Coordinates {
    pub x: BigUint,
    pub y: BigUint,
    pub z: BigUint,
    pub t: BigUint
}

///Group law of one curve family.
///
///Implementations must use complete formulas:
///`add` and `double` may not branch on the values of their inputs.
pub(crate) trait GroupLaw {
    fn field(&self) -> &Field;

    ///The neutral element.
    fn identity(&self) -> Coordinates;

    fn is_identity(&self, point: &Coordinates) -> bool;

    ///Convert affine coordinates into the internal representation.
    fn lift(&self, x: &BigUint, y: &BigUint) -> Coordinates;

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Coordinates;

    fn double(&self, a: &Coordinates) -> Coordinates;

    fn negate(&self, a: &Coordinates) -> Coordinates;

    ///Check the affine curve equation (coordinates must already be reduced).
    fn satisfies_equation(&self, x: &BigUint, y: &BigUint) -> bool;

    ///The value `y²` must take for a point with this `x`, if any.
    fn y_squared(&self, x: &BigUint) -> Option<BigUint>;

    ///Convert to affine coordinates, or `None` for the neutral element.
    fn normalize(&self, point: &Coordinates) -> Option<(BigUint, BigUint)> {
        if self.is_identity(point) {
            return None
        }
        let field = self.field();
        let z_inv = field.inv(&point.z)?;
        return Some((field.mul(&point.x, &z_inv), field.mul(&point.y, &z_inv)))
    }
}

///Double-and-add from the most significant bit with a fixed shape.
///
///Exactly `bits` iterations, each with one doubling and one addition.
///The sum lands in the accumulator when the bit is set and in a decoy otherwise,
///so the sequence of group operations does not depend on `k`.
pub(crate) fn ladder<L: GroupLaw + ?Sized>(law: &L, point: &Coordinates, k: &BigUint, bits: u64) -> Coordinates {
    let mut acc = law.identity();
    let mut decoy = law.identity();
    for i in (0..bits).rev() {
        acc = law.double(&acc);
        let sum = law.add(&acc, point);
        if k.bit(i) {
            acc = sum;
        } else {
            decoy = sum;
        }
    }
    black_box(&decoy);
    return acc
}
