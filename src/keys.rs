/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Private keys and public key derivation.

use std::fmt::Debug;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::{thread_rng, CryptoRng, Rng};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::curve::{Curve, Point, random_scalar_with};
use crate::errors::SignatureError;
use crate::field::in_scalar_range;

///Length in bytes of a private key.
pub const PRIVATE_KEY_LENGTH: usize = 32;

///How the bytes of a private key become the scalar that multiplies `G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationMode {
    ///The bytes are a big-endian scalar in `[1, N-1]`.
    Plain,
    ///The bytes are an Ed25519 seed (RFC 8032 §5.1.5):
    ///hashed with SHA-512, the first half clamped and read little-endian.
    Expanded
}

///A private key.
///
///**This should never be shared.** The bytes are cleared from memory on drop.
#[derive(Clone, Zeroize)]
pub struct PrivateKey(
    [u8; PRIVATE_KEY_LENGTH]

); impl PrivateKey {
    ///Import 32 raw bytes (a big-endian scalar, or a seed for `Expanded` derivation).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        return match bytes.try_into() {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(SignatureError::InvalidParams(
                format!("private key must be {PRIVATE_KEY_LENGTH} bytes")))
        }
    }

    ///Import a scalar, encoded big-endian.
    pub fn from_scalar(scalar: &BigUint) -> Result<Self, SignatureError> {
        let mut bytes = scalar.to_bytes_be();
        if bytes.len() > PRIVATE_KEY_LENGTH {
            bytes.zeroize();
            return Err(SignatureError::InvalidParams("private key is too large".to_owned()))
        }
        let mut key = [0u8; PRIVATE_KEY_LENGTH];
        key[PRIVATE_KEY_LENGTH - bytes.len()..].copy_from_slice(&bytes);
        bytes.zeroize();
        return Ok(Self(key))
    }

    ///Generate a random private key for `curve`.
    pub fn generate(curve: Curve) -> Self {
        return Self::generate_with(curve, &mut thread_rng())
    }

    ///Generate a random private key for `curve` from `rng`.
    pub fn generate_with<R: Rng + CryptoRng + ?Sized>(curve: Curve, rng: &mut R) -> Self {
        let mut bytes = random_scalar_with(curve, rng).to_bytes_be();
        let mut key = [0u8; PRIVATE_KEY_LENGTH];
        key[PRIVATE_KEY_LENGTH - bytes.len()..].copy_from_slice(&bytes);
        bytes.zeroize();
        return Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        return &self.0
    }

    ///The scalar this key signs with on `curve`, using the curve's default derivation.
    pub fn signing_scalar(&self, curve: Curve) -> Result<BigUint, SignatureError> {
        return signing_scalar(self, curve, curve.derivation_mode())
    }

    ///The public key of this private key on `curve`, using the curve's default derivation.
    pub fn public_key(&self, curve: Curve) -> Result<Point, SignatureError> {
        return derive_public_key(self, curve, curve.derivation_mode())
    }

} impl Drop for PrivateKey {
    fn drop(&mut self) {
        //clear the key from memory to improve security
        self.zeroize()
    }

} impl Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey(..)")
    }
}

///Turn a private key into the scalar that multiplies `G`.
pub fn signing_scalar(key: &PrivateKey, curve: Curve, mode: DerivationMode) -> Result<BigUint, SignatureError> {
    let scalar = match mode {
        DerivationMode::Plain => {
            let scalar = BigUint::from_bytes_be(&key.0);
            if !in_scalar_range(&scalar, curve.n()) {
                return Err(SignatureError::InvalidParams("private key must be in [1, N-1]".to_owned()))
            }
            scalar
        },
        DerivationMode::Expanded => {
            let digest = Sha512::digest(key.0);
            let mut head = [0u8; 32];
            head.copy_from_slice(&digest[..32]);
            head[0] &= 248;
            head[31] &= 127;
            head[31] |= 64;
            let scalar = BigUint::from_bytes_le(&head) % curve.n();
            head.zeroize();
            scalar
        }
    };

    if scalar.is_zero() {
        return Err(SignatureError::InvalidParams("private key must be in [1, N-1]".to_owned()))
    }
    return Ok(scalar)
}

///Derive the public key `G·x` of a private key.
pub fn derive_public_key(key: &PrivateKey, curve: Curve, mode: DerivationMode) -> Result<Point, SignatureError> {
    let scalar = signing_scalar(key, curve, mode)?;
    return Ok(curve.mul_generator(&scalar)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_range() {
        let curve = Curve::Secp256k1;
        let zero = PrivateKey::from_bytes(&[0u8; 32]).unwrap();
        assert!(zero.signing_scalar(curve).is_err());

        let too_large = PrivateKey::from_scalar(curve.n()).unwrap();
        assert!(too_large.signing_scalar(curve).is_err());

        let one = PrivateKey::from_scalar(&BigUint::from(1u32)).unwrap();
        assert_eq!(one.public_key(curve).unwrap(), *curve.g());
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(PrivateKey::from_bytes(&[1u8; 31]).is_err());
        assert!(PrivateKey::from_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn generated_keys_are_usable() {
        for curve in Curve::ALL {
            let key = PrivateKey::generate(curve);
            assert!(curve.is_on_curve(&key.public_key(curve).unwrap()));
        }
    }
}
