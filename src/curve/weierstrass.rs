/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Short Weierstrass curves `y² = x³ + b` in homogeneous projective coordinates.
//!
//! Addition and doubling use the complete formulas of Renes, Costello and Batina
//! ("Complete addition formulas for prime order elliptic curves", 2015),
//! algorithms 7 and 9 for `a = 0`.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::field::Field;
use super::group::{Coordinates, GroupLaw};

pub(crate) struct ShortWeierstrass {
    field: Field,
    b: BigUint,
    b3: BigUint

} impl ShortWeierstrass {
    pub fn new(p: BigUint, b: BigUint) -> Self {
        let field = Field::new(p);
        let b3 = field.mul_small(&b, 3);
        return Self{field, b, b3}
    }

} impl GroupLaw for ShortWeierstrass {
    fn field(&self) -> &Field {
        return &self.field
    }

    fn identity(&self) -> Coordinates {
        return Coordinates{x: BigUint::zero(), y: BigUint::one(), z: BigUint::zero(), t: BigUint::zero()}
    }

    fn is_identity(&self, point: &Coordinates) -> bool {
        return self.field.is_zero(&point.z)
    }

    fn lift(&self, x: &BigUint, y: &BigUint) -> Coordinates {
        return Coordinates{x: x.clone(), y: y.clone(), z: BigUint::one(), t: BigUint::zero()}
    }

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Coordinates {
        let f = &self.field;

        let xx = f.mul(&a.x, &b.x);
        let yy = f.mul(&a.y, &b.y);
        let zz = f.mul(&a.z, &b.z);

        let xy_pairs = f.sub(&f.mul(&f.add(&a.x, &a.y), &f.add(&b.x, &b.y)), &f.add(&xx, &yy));
        let yz_pairs = f.sub(&f.mul(&f.add(&a.y, &a.z), &f.add(&b.y, &b.z)), &f.add(&yy, &zz));
        let xz_pairs = f.sub(&f.mul(&f.add(&a.x, &a.z), &f.add(&b.x, &b.z)), &f.add(&xx, &zz));

        let bzz3 = f.mul(&self.b3, &zz);
        let yy_m_bzz3 = f.sub(&yy, &bzz3);
        let yy_p_bzz3 = f.add(&yy, &bzz3);

        let byz3 = f.mul(&self.b3, &yz_pairs);
        let xx3 = f.mul_small(&xx, 3);
        let bxx9 = f.mul(&self.b3, &xx3);

        return Coordinates{
            x: f.sub(&f.mul(&xy_pairs, &yy_m_bzz3), &f.mul(&byz3, &xz_pairs)),
            y: f.add(&f.mul(&yy_p_bzz3, &yy_m_bzz3), &f.mul(&bxx9, &xz_pairs)),
            z: f.add(&f.mul(&yz_pairs, &yy_p_bzz3), &f.mul(&xx3, &xy_pairs)),
            t: BigUint::zero()
        }
    }

    fn double(&self, a: &Coordinates) -> Coordinates {
        let f = &self.field;

        let yy = f.square(&a.y);
        let zz = f.square(&a.z);
        let xy2 = f.mul_small(&f.mul(&a.x, &a.y), 2);

        let bzz3 = f.mul(&self.b3, &zz);
        let bzz9 = f.mul_small(&bzz3, 3);
        let yy_m_bzz9 = f.sub(&yy, &bzz9);
        let yy_p_bzz3 = f.add(&yy, &bzz3);

        //24·b·Y²·Z²
        let t = f.mul_small(&f.mul(&yy, &bzz3), 8);

        return Coordinates{
            x: f.mul(&xy2, &yy_m_bzz9),
            y: f.add(&f.mul(&yy_m_bzz9, &yy_p_bzz3), &t),
            z: f.mul_small(&f.mul(&f.mul(&yy, &a.y), &a.z), 8),
            t: BigUint::zero()
        }
    }

    fn negate(&self, a: &Coordinates) -> Coordinates {
        return Coordinates{x: a.x.clone(), y: self.field.neg(&a.y), z: a.z.clone(), t: BigUint::zero()}
    }

    fn satisfies_equation(&self, x: &BigUint, y: &BigUint) -> bool {
        return match self.y_squared(x) {
            Some(rhs) => self.field.square(y) == rhs,
            None => false
        }
    }

    fn y_squared(&self, x: &BigUint) -> Option<BigUint> {
        let f = &self.field;
        return Some(f.add(&f.mul(&f.square(x), x), &self.b))
    }
}
