/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::internal_common::*;
use super::signature_utils::check_point;

///The Schnorr response which closes the challenge chain at the signer's slot.
///
///A response `r` satisfies `G·r + K·c = G·alpha` for the public key `K = G·x`.
pub struct SchnorrResponse;

impl SchnorrResponse {
    ///Return `(alpha - c·x) mod N`.
    ///
    ///Fails with `InvalidParams` if the signing scalar `x` is not in `[1, N-1]`.
    pub fn compute(alpha: &BigUint, c: &BigUint, signing_scalar: &BigUint, curve: Curve) -> Result<BigUint, SignatureError> {
        let n = curve.n();
        if !in_scalar_range(signing_scalar, n) {
            return Err(SignatureError::InvalidParams("private key must be in [1, N-1]".to_owned()))
        }
        let cx = (c * signing_scalar) % n;
        return Ok(((alpha % n) + n - cx) % n)
    }

    ///Same as `compute`, deriving the signing scalar from a private key
    ///with the curve's default derivation.
    pub fn compute_with_key(alpha: &BigUint, c: &BigUint, key: &PrivateKey, curve: Curve) -> Result<BigUint, SignatureError> {
        let x = key.signing_scalar(curve)?;
        return Self::compute(alpha, c, &x, curve)
    }

    ///Check that `G·response + signer·c == G·alpha`.
    pub fn verify(
        alpha: &BigUint, signer: &Point, c: &BigUint, response: &BigUint, curve: Curve
    ) -> Result<bool, SignatureError> {
        check_point(signer, curve)?;
        let g = curve.generator_coordinates();
        let lhs = curve.add_coordinates(
            &curve.mul_coordinates_unsafe(&g, response),
            &curve.mul_coordinates_unsafe(&curve.lift(signer)?, c)
        );
        let rhs = curve.mul_coordinates_unsafe(&g, alpha);
        return Ok(curve.encode_coordinates(&lhs) == curve.encode_coordinates(&rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_satisfies_relation() {
        for curve in Curve::ALL {
            let key = PrivateKey::generate(curve);
            let signer = key.public_key(curve).unwrap();
            let alpha = random_scalar(curve);
            let c = random_scalar(curve);

            let r = SchnorrResponse::compute_with_key(&alpha, &c, &key, curve).unwrap();
            assert!(SchnorrResponse::verify(&alpha, &signer, &c, &r, curve).unwrap());
            assert!(!SchnorrResponse::verify(&alpha, &signer, &c, &(r + 1u32), curve).unwrap());
        }
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        let curve = Curve::Secp256k1;
        let one = BigUint::from(1u32);
        assert!(matches!(
            SchnorrResponse::compute(&one, &one, &BigUint::from(0u32), curve),
            Err(SignatureError::InvalidParams(_))
        ));
        assert!(matches!(
            SchnorrResponse::compute(&one, &one, curve.n(), curve),
            Err(SignatureError::InvalidParams(_))
        ));
    }
}
