/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Confidential delivery of partial signatures to the key holder.
//!
//! A partial signature carries the nonce `alpha`, which together with the signer's
//! response reveals the private key, so it should only travel encrypted.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::internal_common::*;
use crate::signature::check_point;

///Encrypt bytes to the holder of a public key.
pub trait Transport {
    fn encrypt(&self, plaintext: &[u8], recipient: &Point) -> Result<Vec<u8>, SignatureError>;

    ///Fails with `DecryptionFailed` if the ciphertext is malformed or was tampered with.
    fn decrypt(&self, ciphertext: &[u8], recipient_key: &PrivateKey) -> Result<Vec<u8>, SignatureError>;
}

///Shared secret between an ephemeral key and the recipient's key: the compressed shared point.
///
///**This should not be publically shared.**
#[derive(Zeroize)]
struct SharedSecret(
    Vec<u8>

); impl SharedSecret {
    fn get(curve: Curve, private: &BigUint, other_public: &Point) -> Result<Self, CurveError> {
        return Ok(Self(curve.scalar_mul(other_public, private)?.to_compressed_bytes()))
    }

} impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize()
    }
}

///Elliptic curve integrated encryption on one of the supported curves.
///
///Output is `R ‖ ciphertext ‖ tag`, where `R = G·e` for a fresh ephemeral scalar `e`.
///The plaintext is XOR'ed with a keystream of hashes of the shared secret and a block counter,
///and the tag is `H(mac_key ‖ H(R ‖ ciphertext))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EciesTransport {
    curve: Curve,
    hash_config: HashConfig

} impl EciesTransport {
    pub fn new(curve: Curve, hash_config: HashConfig) -> Self {
        return Self{curve, hash_config}
    }

    pub fn curve(&self) -> Curve {
        return self.curve
    }

    fn tag_len(&self) -> usize {
        return self.hash_config.digest(&[]).len()
    }

    fn apply_keystream(&self, secret: &SharedSecret, data: &mut [u8]) {
        let key = self.hash_config.domain_digest(&secret.0, domains::TRANSPORT_ENCRYPTION_KEY);
        for (counter, chunk) in data.chunks_mut(key.len()).enumerate() {
            let mut block = self.hash_config.digest(&[key.as_slice(), &(counter as u64).to_be_bytes()].concat());
            chunk.iter_mut()
                .zip(block.iter())
                .for_each(|(byte, k)| *byte ^= k);
            block.zeroize();
        }
    }

    fn tag(&self, secret: &SharedSecret, ephemeral: &[u8], ciphertext: &[u8]) -> Vec<u8> {
        let mac_key = self.hash_config.domain_digest(&secret.0, domains::TRANSPORT_MAC_KEY);
        let inner = self.hash_config.digest(&[ephemeral, ciphertext].concat());
        return self.hash_config.digest(&[mac_key, inner].concat())
    }

} impl Transport for EciesTransport {
    fn encrypt(&self, plaintext: &[u8], recipient: &Point) -> Result<Vec<u8>, SignatureError> {
        check_point(recipient, self.curve)?;

        let ephemeral_private = random_scalar(self.curve);
        let ephemeral = self.curve.mul_generator(&ephemeral_private)?.to_compressed_bytes();
        let secret = SharedSecret::get(self.curve, &ephemeral_private, recipient)?;

        let mut ciphertext = plaintext.to_vec();
        self.apply_keystream(&secret, &mut ciphertext);
        let tag = self.tag(&secret, &ephemeral, &ciphertext);

        return Ok([ephemeral, ciphertext, tag].concat())
    }

    fn decrypt(&self, ciphertext: &[u8], recipient_key: &PrivateKey) -> Result<Vec<u8>, SignatureError> {
        let point_len = 1 + self.curve.field_width();
        let tag_len = self.tag_len();
        if ciphertext.len() < point_len + tag_len {
            return Err(SignatureError::DecryptionFailed)
        }
        let (ephemeral, rest) = ciphertext.split_at(point_len);
        let (body, tag) = rest.split_at(rest.len() - tag_len);

        let ephemeral_point = Point::from_bytes(self.curve, ephemeral)
            .map_err(|_| SignatureError::DecryptionFailed)?;
        let private = recipient_key.signing_scalar(self.curve)?;
        let secret = SharedSecret::get(self.curve, &private, &ephemeral_point)
            .map_err(|_| SignatureError::DecryptionFailed)?;

        let expected = self.tag(&secret, ephemeral, body);
        if !bool::from(expected.as_slice().ct_eq(tag)) {
            return Err(SignatureError::DecryptionFailed)
        }

        let mut plaintext = body.to_vec();
        self.apply_keystream(&secret, &mut plaintext);
        return Ok(plaintext)
    }
}
