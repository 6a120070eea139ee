/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Elliptic curve functions and constants
//!
//! Two curve families sit behind one group law:
//! secp256k1 (short Weierstrass, projective coordinates)
//! and Ed25519 (twisted Edwards, extended coordinates).
//! Public operations take and return affine [`Point`]s;
//! the internal representation never leaves the crate.

mod group;
mod weierstrass;
mod edwards;

use std::fmt::Display;

pub use num_bigint::BigUint;
use num_bigint::RandBigInt;
use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, Rng};

use crate::errors::CurveError;
use crate::field::in_scalar_range;
use crate::keys::DerivationMode;

pub(crate) use group::{Coordinates, GroupLaw};
use group::ladder;
use weierstrass::ShortWeierstrass;
use edwards::TwistedEdwards;

///Width in bytes of a field element in the canonical encoding.
pub const FIELD_WIDTH: usize = 32;

///Tag of a compressed point with even `y`.
pub const TAG_EVEN: u8 = 0x02;
///Tag of a compressed point with odd `y`.
pub const TAG_ODD: u8 = 0x03;
///Tag of an uncompressed point.
pub const TAG_UNCOMPRESSED: u8 = 0x04;
///Encoding of the neutral element when it has to be hashed.
const IDENTITY_ENCODING: u8 = 0x00;

fn from_hex(hex: &str) -> BigUint {
    return BigUint::parse_bytes(hex.as_bytes(), 16)
        .expect("Invalid curve constant")
}

///Public parameters of a supported curve.
struct CurveParams {
    p: BigUint,
    n: BigUint,
    g: Point
}

lazy_static! {
    static ref SECP256K1_LAW: ShortWeierstrass = ShortWeierstrass::new(
        from_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        BigUint::from(7u32)
    );
    static ref SECP256K1_PARAMS: CurveParams = CurveParams{
        p: from_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"),
        n: from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        g: Point::from_affine_unchecked(
            Curve::Secp256k1,
            from_hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
            from_hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")
        )
    };

    static ref ED25519_LAW: TwistedEdwards = TwistedEdwards::new(
        from_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        //d = -121665/121666
        from_hex("52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3")
    );
    static ref ED25519_PARAMS: CurveParams = CurveParams{
        p: from_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"),
        //2^252 + 27742317777372353535851937790883648493
        n: from_hex("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"),
        g: Point::from_affine_unchecked(
            Curve::Ed25519,
            from_hex("216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"),
            from_hex("6666666666666666666666666666666666666666666666666666666666666658")
        )
    };
}

///A supported elliptic curve.
///
///Each variant stands for a fixed set of public parameters `{P, N, G}`,
///so two curves are equal exactly when their names and parameters are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    ///Short Weierstrass curve `y² = x³ + 7` (Bitcoin/Ethereum).
    Secp256k1,
    ///Twisted Edwards curve `-x² + y² = 1 + d·x²·y²` (EdDSA).
    Ed25519

} impl Curve {
    ///Every supported curve.
    pub const ALL: [Curve; 2] = [Curve::Secp256k1, Curve::Ed25519];

    ///Canonical lowercase name, as used in serialized signatures.
    pub fn name(&self) -> &'static str {
        return match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519"
        }
    }

    ///Look up a curve by name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, CurveError> {
        return Self::ALL.into_iter()
            .find(|curve| curve.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CurveError::UnknownCurve(name.to_owned()))
    }

    fn params(&self) -> &'static CurveParams {
        return match self {
            Self::Secp256k1 => &*SECP256K1_PARAMS,
            Self::Ed25519 => &*ED25519_PARAMS
        }
    }

    pub(crate) fn law(&self) -> &'static dyn GroupLaw {
        return match self {
            Self::Secp256k1 => &*SECP256K1_LAW,
            Self::Ed25519 => &*ED25519_LAW
        }
    }

    ///Field prime `P`.
    pub fn p(&self) -> &'static BigUint {
        return &self.params().p
    }

    ///Order `N` of the generator.
    pub fn n(&self) -> &'static BigUint {
        return &self.params().n
    }

    ///Generator `G`.
    pub fn g(&self) -> &'static Point {
        return &self.params().g
    }

    ///Width in bytes of an encoded coordinate.
    pub fn field_width(&self) -> usize {
        return FIELD_WIDTH
    }

    ///How private keys are turned into scalars on this curve by default.
    pub fn derivation_mode(&self) -> DerivationMode {
        return match self {
            Self::Secp256k1 => DerivationMode::Plain,
            Self::Ed25519 => DerivationMode::Expanded
        }
    }

    ///Check that `point` belongs to this curve: `0 < x, y < P` and the curve equation holds.
    ///
    ///Never fails; malformed points simply return `false`.
    pub fn is_on_curve(&self, point: &Point) -> bool {
        if point.curve != *self {
            return false
        }
        let p = self.p();
        if point.x.is_zero() || point.y.is_zero() || &point.x >= p || &point.y >= p {
            return false
        }
        return self.law().satisfies_equation(&point.x, &point.y)
    }

    ///`a + b`
    pub fn add(&self, a: &Point, b: &Point) -> Result<Point, CurveError> {
        let sum = self.law().add(&self.lift(a)?, &self.lift(b)?);
        return self.normalize(&sum)
    }

    ///`2a`
    pub fn double(&self, a: &Point) -> Result<Point, CurveError> {
        return self.normalize(&self.law().double(&self.lift(a)?))
    }

    ///`-a`
    pub fn negate(&self, a: &Point) -> Result<Point, CurveError> {
        return self.normalize(&self.law().negate(&self.lift(a)?))
    }

    ///`k·point`, for `k` in `[1, N-1]`.
    ///
    ///Runs in a fixed number of group operations for every valid `k`,
    ///and is therefore the path to use for anything derived from a private key.
    pub fn scalar_mul(&self, point: &Point, k: &BigUint) -> Result<Point, CurveError> {
        let product = self.mul_coordinates(&self.lift(point)?, k)?;
        return self.normalize(&product)
    }

    ///`k·G`, for `k` in `[1, N-1]`.
    pub fn mul_generator(&self, k: &BigUint) -> Result<Point, CurveError> {
        return self.scalar_mul(self.g(), k)
    }

    ///`k·point` for any `k`, reduced modulo `N`.
    ///
    ///**Only for public scalars.** `k ≡ 0` yields the neutral element,
    ///which is reported as `CurveError::PointAtInfinity`.
    pub fn scalar_mul_unsafe(&self, point: &Point, k: &BigUint) -> Result<Point, CurveError> {
        let product = self.mul_coordinates_unsafe(&self.lift(point)?, k);
        return self.normalize(&product)
    }

    ///Validate a point and convert it into the internal representation.
    pub(crate) fn lift(&self, point: &Point) -> Result<Coordinates, CurveError> {
        if !self.is_on_curve(point) {
            return Err(CurveError::InvalidPoint)
        }
        return Ok(self.law().lift(&point.x, &point.y))
    }

    pub(crate) fn generator_coordinates(&self) -> Coordinates {
        let g = self.g();
        return self.law().lift(&g.x, &g.y)
    }

    pub(crate) fn add_coordinates(&self, a: &Coordinates, b: &Coordinates) -> Coordinates {
        return self.law().add(a, b)
    }

    pub(crate) fn mul_coordinates(&self, point: &Coordinates, k: &BigUint) -> Result<Coordinates, CurveError> {
        if !in_scalar_range(k, self.n()) {
            return Err(CurveError::InvalidScalar)
        }
        return Ok(ladder(self.law(), point, k, self.n().bits()))
    }

    pub(crate) fn mul_coordinates_unsafe(&self, point: &Coordinates, k: &BigUint) -> Coordinates {
        let k = k % self.n();
        if k.is_zero() {
            return self.law().identity()
        }
        return ladder(self.law(), point, &k, self.n().bits())
    }

    ///Back to affine form; the neutral element has none.
    pub(crate) fn normalize(&self, point: &Coordinates) -> Result<Point, CurveError> {
        return match self.law().normalize(point) {
            Some((x, y)) => Ok(Point{curve: *self, x, y}),
            None => Err(CurveError::PointAtInfinity)
        }
    }

    ///Compressed encoding for hashing; the neutral element encodes as a single `0x00`.
    pub(crate) fn encode_coordinates(&self, point: &Coordinates) -> Vec<u8> {
        return match self.normalize(point) {
            Ok(affine) => affine.to_compressed_bytes(),
            Err(_) => vec!(IDENTITY_ENCODING)
        }
    }

} impl Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

///An affine point on a specific curve.
///
///Points built with [`Point::new`] or decoded with [`Point::from_bytes`] are always valid.
///Points built with [`Point::from_affine_unchecked`] must be validated
///(e.g. with `check_point`/`check_ring`) before they are used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    curve: Curve,
    x: BigUint,
    y: BigUint

} impl Point {
    ///Create a point from affine coordinates, checking that it is on the curve.
    pub fn new(curve: Curve, x: BigUint, y: BigUint) -> Result<Self, CurveError> {
        let point = Self{curve, x, y};
        return match curve.is_on_curve(&point) {
            true => Ok(point),
            false => Err(CurveError::InvalidPoint)
        }
    }

    ///Create a point without any validation.
    pub fn from_affine_unchecked(curve: Curve, x: BigUint, y: BigUint) -> Self {
        return Self{curve, x, y}
    }

    pub fn curve(&self) -> Curve {
        return self.curve
    }

    pub fn x(&self) -> &BigUint {
        return &self.x
    }

    pub fn y(&self) -> &BigUint {
        return &self.y
    }

    ///`0x02`/`0x03` (parity of `y`) followed by the big-endian `x`.
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        let tag = match self.y.bit(0) {
            true => TAG_ODD,
            false => TAG_EVEN
        };
        return [&[tag][..], &to_fixed_bytes(&self.x)].concat()
    }

    ///`0x04` followed by the big-endian `x` and `y`.
    pub fn to_uncompressed_bytes(&self) -> Vec<u8> {
        return [&[TAG_UNCOMPRESSED][..], &to_fixed_bytes(&self.x), &to_fixed_bytes(&self.y)].concat()
    }

    ///Decode a compressed or uncompressed point and check that it is on `curve`.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, CurveError> {
        let width = curve.field_width();
        let (&tag, body) = bytes.split_first().ok_or(CurveError::InvalidEncoding)?;

        return match (tag, body.len()) {
            (TAG_EVEN | TAG_ODD, len) if len == width => {
                let x = BigUint::from_bytes_be(body);
                if &x >= curve.p() {
                    return Err(CurveError::InvalidPoint)
                }
                let law = curve.law();
                let y_squared = law.y_squared(&x).ok_or(CurveError::InvalidPoint)?;
                let mut y = law.field().sqrt(&y_squared).ok_or(CurveError::InvalidPoint)?;
                if y.bit(0) != (tag == TAG_ODD) {
                    y = law.field().neg(&y);
                }
                Self::new(curve, x, y)
            },
            (TAG_UNCOMPRESSED, len) if len == 2 * width => {
                let x = BigUint::from_bytes_be(&body[..width]);
                let y = BigUint::from_bytes_be(&body[width..]);
                Self::new(curve, x, y)
            },
            _ => Err(CurveError::InvalidEncoding)
        }
    }
}

///Big-endian encoding, left-padded to the field width.
fn to_fixed_bytes(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    if bytes.len() >= FIELD_WIDTH {
        return bytes
    }
    return [vec![0u8; FIELD_WIDTH - bytes.len()], bytes].concat()
}

///Return a uniformly random scalar in `[1, N-1]`.
pub fn random_scalar(curve: Curve) -> BigUint {
    return random_scalar_with(curve, &mut thread_rng())
}

///Return a uniformly random scalar in `[1, N-1]` drawn from `rng`.
pub fn random_scalar_with<R: Rng + CryptoRng + ?Sized>(curve: Curve, rng: &mut R) -> BigUint {
    return rng.gen_biguint_range(&BigUint::one(), curve.n())
}

///Return a random point on the curve.
pub fn random_point(curve: Curve) -> Point {
    loop {
        if let Ok(point) = curve.mul_generator(&random_scalar(curve)) {
            return point
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_are_on_curve() {
        for curve in Curve::ALL {
            assert!(curve.is_on_curve(curve.g()));
            //(N-1)·G + G = O
            let g = curve.generator_coordinates();
            let minus_g = curve.mul_coordinates_unsafe(&g, &(curve.n() - 1u32));
            assert!(curve.law().is_identity(&curve.add_coordinates(&minus_g, &g)));
            let n_minus_one = curve.mul_generator(&(curve.n() - 1u32)).unwrap();
            assert_eq!(n_minus_one, curve.negate(curve.g()).unwrap());
        }
    }

    #[test]
    fn identity_encoding() {
        for curve in Curve::ALL {
            assert_eq!(curve.encode_coordinates(&curve.law().identity()), vec!(IDENTITY_ENCODING));
        }
    }

    #[test]
    fn mismatched_curve_tag_is_rejected() {
        let g = Curve::Secp256k1.g().clone();
        assert!(!Curve::Ed25519.is_on_curve(&g));
    }
}
