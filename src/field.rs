/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Modular arithmetic shared by every curve backend.

use std::mem;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

///Canonical residue of `a` modulo `m`, in `[0, m)`, also for negative `a`.
pub fn modulo(a: &BigInt, m: &BigUint) -> BigUint {
    let m = BigInt::from(m.clone());
    let r = ((a % &m) + &m) % &m;
    return r.magnitude().clone()
}

///Inverse of `a` modulo `m` using the extended Euclidean algorithm.
///
///Returns `None` if `a` and `m` are not coprime (in particular if `a ≡ 0`).
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None
    }

    let mut old_r = BigInt::from(a % m);
    let mut r = BigInt::from(m.clone());
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();
    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return None
    }
    return Some(modulo(&old_s, m))
}

///Check that `1 <= k < n`.
pub fn in_scalar_range(k: &BigUint, n: &BigUint) -> bool {
    return !k.is_zero() && k < n
}

///Prime field `GF(p)`.
///
///All methods expect reduced inputs and return reduced outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    p: BigUint

} impl Field {
    pub fn new(p: BigUint) -> Self {
        return Self{p}
    }

    ///The field prime.
    pub fn modulus(&self) -> &BigUint {
        return &self.p
    }

    pub fn reduce(&self, a: &BigUint) -> BigUint {
        return a % &self.p
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        return (a + b) % &self.p
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        return (a + &self.p - (b % &self.p)) % &self.p
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        return (&self.p - (a % &self.p)) % &self.p
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        return (a * b) % &self.p
    }

    pub fn square(&self, a: &BigUint) -> BigUint {
        return self.mul(a, a)
    }

    pub fn mul_small(&self, a: &BigUint, k: u64) -> BigUint {
        return (a * k) % &self.p
    }

    pub fn pow(&self, a: &BigUint, e: &BigUint) -> BigUint {
        return a.modpow(e, &self.p)
    }

    pub fn inv(&self, a: &BigUint) -> Option<BigUint> {
        return mod_inverse(a, &self.p)
    }

    pub fn is_zero(&self, a: &BigUint) -> bool {
        return (a % &self.p).is_zero()
    }

    ///Square root, if `a` is a quadratic residue.
    ///
    ///Supports `p ≡ 3 (mod 4)` (secp256k1) and `p ≡ 5 (mod 8)` (Ed25519).
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Some(a)
        }

        let p = &self.p;
        let root = if p % 4u32 == BigUint::from(3u32) {
            self.pow(&a, &((p + 1u32) >> 2))
        } else if p % 8u32 == BigUint::from(5u32) {
            let candidate = self.pow(&a, &((p + 3u32) >> 3));
            if self.square(&candidate) == a {
                candidate
            } else {
                //multiply by sqrt(-1) = 2^((p-1)/4)
                let sqrt_minus_one = self.pow(&BigUint::from(2u32), &((p - 1u32) >> 2));
                self.mul(&candidate, &sqrt_minus_one)
            }
        } else {
            return None
        };

        return match self.square(&root) == a {
            true => Some(root),
            false => None
        }
    }
}
