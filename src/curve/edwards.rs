/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Twisted Edwards curves `-x² + y² = 1 + d·x²·y²` in extended coordinates.
//!
//! Uses the unified formulas of Hisil, Wong, Carter and Dawson
//! ("Twisted Edwards Curves Revisited", 2008) for `a = -1`,
//! which are complete when `d` is not a square.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::field::Field;
use super::group::{Coordinates, GroupLaw};

pub(crate) struct TwistedEdwards {
    field: Field,
    d: BigUint,
    d2: BigUint

} impl TwistedEdwards {
    pub fn new(p: BigUint, d: BigUint) -> Self {
        let field = Field::new(p);
        let d2 = field.mul_small(&d, 2);
        return Self{field, d, d2}
    }

} impl GroupLaw for TwistedEdwards {
    fn field(&self) -> &Field {
        return &self.field
    }

    fn identity(&self) -> Coordinates {
        return Coordinates{x: BigUint::zero(), y: BigUint::one(), z: BigUint::one(), t: BigUint::zero()}
    }

    fn is_identity(&self, point: &Coordinates) -> bool {
        return self.field.is_zero(&point.x)
            && self.field.reduce(&point.y) == self.field.reduce(&point.z)
    }

    fn lift(&self, x: &BigUint, y: &BigUint) -> Coordinates {
        return Coordinates{x: x.clone(), y: y.clone(), z: BigUint::one(), t: self.field.mul(x, y)}
    }

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Coordinates {
        let f = &self.field;

        let aa = f.mul(&f.sub(&a.y, &a.x), &f.sub(&b.y, &b.x));
        let bb = f.mul(&f.add(&a.y, &a.x), &f.add(&b.y, &b.x));
        let cc = f.mul(&f.mul(&a.t, &self.d2), &b.t);
        let dd = f.mul_small(&f.mul(&a.z, &b.z), 2);

        let e = f.sub(&bb, &aa);
        let ff = f.sub(&dd, &cc);
        let g = f.add(&dd, &cc);
        let h = f.add(&bb, &aa);

        return Coordinates{
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h)
        }
    }

    fn double(&self, a: &Coordinates) -> Coordinates {
        let f = &self.field;

        let aa = f.square(&a.x);
        let bb = f.square(&a.y);
        let cc = f.mul_small(&f.square(&a.z), 2);
        let h = f.add(&aa, &bb);
        let e = f.sub(&h, &f.square(&f.add(&a.x, &a.y)));
        let g = f.sub(&aa, &bb);
        let ff = f.add(&cc, &g);

        return Coordinates{
            x: f.mul(&e, &ff),
            y: f.mul(&g, &h),
            z: f.mul(&ff, &g),
            t: f.mul(&e, &h)
        }
    }

    fn negate(&self, a: &Coordinates) -> Coordinates {
        return Coordinates{x: self.field.neg(&a.x), y: a.y.clone(), z: a.z.clone(), t: self.field.neg(&a.t)}
    }

    fn satisfies_equation(&self, x: &BigUint, y: &BigUint) -> bool {
        let f = &self.field;
        let xx = f.square(x);
        let yy = f.square(y);
        let lhs = f.sub(&yy, &xx);
        let rhs = f.add(&BigUint::one(), &f.mul(&self.d, &f.mul(&xx, &yy)));
        return lhs == rhs
    }

    fn y_squared(&self, x: &BigUint) -> Option<BigUint> {
        //y² = (1 + x²) / (1 - d·x²)
        let f = &self.field;
        let xx = f.square(x);
        let numerator = f.add(&BigUint::one(), &xx);
        let denominator = f.sub(&BigUint::one(), &f.mul(&self.d, &xx));
        return Some(f.mul(&numerator, &f.inv(&denominator)?))
    }
}
