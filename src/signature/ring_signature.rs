/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use rand::{thread_rng, CryptoRng, Rng};
use tracing::{debug, trace, warn};

use crate::internal_common::*;
use super::schnorr::SchnorrResponse;
use super::signature_utils::*;

///A ring signature.
///
///Proves that the holder of the private key of one of the ring members signed the message,
///without revealing which member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingSignature {
    message: Vec<u8>,
    ring: Vec<Point>,
    c: BigUint,
    responses: Vec<BigUint>,
    curve: Curve,
    hash_config: HashConfig

} impl RingSignature {
    ///Assemble a signature from its parts, without any validation.
    ///
    ///Use `verify` to check it.
    pub fn new(
        message: Vec<u8>, ring: Vec<Point>, c: BigUint, responses: Vec<BigUint>, curve: Curve, hash_config: HashConfig
    ) -> Self {
        return Self{message, ring, c, responses, curve, hash_config}
    }

    ///Sign `message` with `private_key`, hiding among the members of `ring`.
    ///
    ///The signer's public key is inserted into the ring at a random position,
    ///so the resulting ring is one member longer than `ring`.
    ///`ring` may be empty, producing a single-member ring signature.
    pub fn sign(
        ring: &[Point], private_key: &PrivateKey, message: &[u8], curve: Curve, hash_config: HashConfig
    ) -> Result<Self, SignatureError> {
        return Self::sign_with_rng(ring, private_key, message, curve, hash_config, &mut thread_rng())
    }

    ///Same as `sign`, drawing the signer's position and all scalars from `rng`.
    pub fn sign_with_rng<R: Rng + CryptoRng + ?Sized>(
        ring: &[Point], private_key: &PrivateKey, message: &[u8], curve: Curve, hash_config: HashConfig, rng: &mut R
    ) -> Result<Self, SignatureError> {
        debug!(curve = %curve, hash = %hash_config, ring_size = ring.len(), "signing");
        check_ring(ring, curve, true)?;

        let x = private_key.signing_scalar(curve)?;
        let signer = curve.mul_generator(&x)?;

        let open = open_chain(ring, &signer, message, curve, hash_config, rng)?;
        let response = SchnorrResponse::compute(&open.alpha, &open.cpi, &x, curve)?;
        let OpenChain{ring, pi, c0, mut responses, ..} = open;
        responses[pi] = response;

        trace!(ring_size = ring.len(), "challenge chain closed");
        return Ok(Self{message: message.to_vec(), ring, c: c0, responses, curve, hash_config})
    }

    ///Verify the signature.
    ///
    ///Fails only for a structurally invalid signature
    ///(`RingResponseLengthMismatch` or `EmptyRing`);
    ///any other problem returns `Ok(false)`.
    pub fn verify(&self) -> Result<bool, SignatureError> {
        debug!(curve = %self.curve, hash = %self.hash_config, ring_size = self.ring.len(), "verifying");
        if self.ring.len() != self.responses.len() {
            return Err(SignatureError::RingResponseLengthMismatch)
        }
        if self.ring.is_empty() {
            return Err(SignatureError::EmptyRing)
        }

        let valid = close_chain(&self.ring, &self.responses, &self.c, &self.message, self.curve, self.hash_config);
        if !valid {
            warn!(curve = %self.curve, ring_size = self.ring.len(), "ring signature did not verify");
        }
        return Ok(valid)
    }

    pub fn message(&self) -> &[u8] {
        return &self.message
    }

    pub fn ring(&self) -> &[Point] {
        return &self.ring
    }

    ///The challenge at ring index 0.
    pub fn c(&self) -> &BigUint {
        return &self.c
    }

    pub fn responses(&self) -> &[BigUint] {
        return &self.responses
    }

    pub fn curve(&self) -> Curve {
        return self.curve
    }

    pub fn hash_config(&self) -> HashConfig {
        return self.hash_config
    }
}

#[cfg(feature = "serialization")]
mod wire {
    use serde::Serialize;

    use crate::tobytes::*;
    use super::*;

    #[derive(Serialize)]
    struct RingSignatureJson<'a> {
        message: &'a str,
        ring: Vec<String>,
        c: String,
        responses: Vec<String>,
        curve: CurveJson,
        config: ConfigJson
    }

    impl ToBytes for RingSignature {
        fn to_json(&self) -> Result<String, SerializationError> {
            return to_json_string(&RingSignatureJson{
                message: encode_message(&self.message)?,
                ring: encode_points(&self.ring),
                c: self.c.to_string(),
                responses: encode_scalars(&self.responses),
                curve: CurveJson::new(self.curve),
                config: ConfigJson::new(self.hash_config)
            })
        }

        fn from_json(json: &str) -> Result<Self, SignatureError> {
            let object = parse_object(json)?;
            let message = parse_message(&object)?;
            let c = parse_scalar(&object, "c")?;
            let responses = parse_scalars(&object, "responses")?;
            let curve = parse_curve(&object)?;
            let ring = parse_ring(&object, curve)?;
            let hash_config = parse_hash_config(&object)?;

            return Ok(RingSignature::new(message, ring, c, responses, curve, hash_config))
        }
    }
}
