/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use num_traits::Zero;
use rand::{thread_rng, CryptoRng, Rng};
use tracing::debug;

use crate::internal_common::*;
use super::RingSignature;
use super::schnorr::SchnorrResponse;
use super::signature_utils::*;

///A ring signature missing only the signer's response.
///
///Built by a coordinator who knows the signer's public key only,
///answered by whoever holds the private key (see `signer_response`),
///then completed with `combine`.
///
///`alpha` binds a partial signature to a single response:
///answering the same partial signature twice would reveal the private key.
///For this reason it is not `Clone` and `combine` consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PartialSignature {
    message: Vec<u8>,
    ring: Vec<Point>,
    c: BigUint,
    cpi: BigUint,
    pi: usize,
    alpha: BigUint,
    ///Every slot except `pi`, in ring order.
    responses: Vec<BigUint>,
    curve: Curve,
    hash_config: HashConfig

} impl PartialSignature {
    ///Assemble a partial signature from its parts, without any validation.
    ///
    ///`responses` holds every slot except `pi`, so it is one entry shorter than `ring`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        message: Vec<u8>,
        ring: Vec<Point>,
        c: BigUint,
        cpi: BigUint,
        pi: usize,
        alpha: BigUint,
        responses: Vec<BigUint>,
        curve: Curve,
        hash_config: HashConfig
    ) -> Self {
        return Self{message, ring, c, cpi, pi, alpha, responses, curve, hash_config}
    }

    ///Run every step of signing except the signer's response, for the holder of `signer`'s private key.
    pub fn partial_sign(
        ring: &[Point], message: &[u8], signer: &Point, curve: Curve, hash_config: HashConfig
    ) -> Result<Self, SignatureError> {
        return Self::partial_sign_with_rng(ring, message, signer, curve, hash_config, &mut thread_rng())
    }

    ///Same as `partial_sign`, drawing the signer's position and all scalars from `rng`.
    pub fn partial_sign_with_rng<R: Rng + CryptoRng + ?Sized>(
        ring: &[Point], message: &[u8], signer: &Point, curve: Curve, hash_config: HashConfig, rng: &mut R
    ) -> Result<Self, SignatureError> {
        debug!(curve = %curve, hash = %hash_config, ring_size = ring.len(), "partial signing");
        check_point(signer, curve)?;

        let OpenChain{ring, pi, alpha, c0, cpi, mut responses} =
            open_chain(ring, signer, message, curve, hash_config, rng)?;
        responses.remove(pi);

        return Ok(Self{message: message.to_vec(), ring, c: c0, cpi, pi, alpha, responses, curve, hash_config})
    }

    ///Run `partial_sign` and encrypt the result to `recipient` with `transport`.
    #[cfg(feature = "serialization")]
    pub fn partial_sign_encrypted<T: Transport + ?Sized>(
        ring: &[Point], message: &[u8], signer: &Point, curve: Curve, hash_config: HashConfig,
        transport: &T, recipient: &Point
    ) -> Result<Vec<u8>, SignatureError> {
        return Self::partial_sign(ring, message, signer, curve, hash_config)?
            .encrypt(transport, recipient)
    }

    ///Serialize and encrypt this partial signature to `recipient` with `transport`.
    #[cfg(feature = "serialization")]
    pub fn encrypt<T: Transport + ?Sized>(&self, transport: &T, recipient: &Point) -> Result<Vec<u8>, SignatureError> {
        let serialized = self.to_bytes()
            .map_err(|_| SignatureError::InvalidParams("message must be valid UTF-8".to_owned()))?;
        return transport.encrypt(&serialized, recipient)
    }

    ///Decrypt and deserialize a partial signature sent with `encrypt`.
    #[cfg(feature = "serialization")]
    pub fn decrypt<T: Transport + ?Sized>(ciphertext: &[u8], transport: &T, key: &PrivateKey) -> Result<Self, SignatureError> {
        let serialized = transport.decrypt(ciphertext, key)?;
        return Self::from_bytes(&serialized)
    }

    ///The response of the holder of `key`: `(alpha - cpi·x) mod N`.
    pub fn signer_response(&self, key: &PrivateKey) -> Result<BigUint, SignatureError> {
        return SchnorrResponse::compute_with_key(&self.alpha, &self.cpi, key, self.curve)
    }

    ///Insert the signer's response, completing the ring signature.
    ///
    ///The challenge chain is not re-walked:
    ///the result only verifies if `signer_response` answered this exact partial signature.
    pub fn combine(self, signer_response: &BigUint) -> Result<RingSignature, SignatureError> {
        debug!(curve = %self.curve, ring_size = self.ring.len(), "combining");
        if self.message.is_empty() {
            return Err(SignatureError::NoEmptyMessage)
        }
        if self.ring.is_empty() {
            return Err(SignatureError::EmptyRing)
        }
        if self.pi >= self.ring.len() {
            return Err(SignatureError::InvalidParams("pi must be < ring.length".to_owned()))
        }
        if self.responses.len() + 1 != self.ring.len() {
            return Err(SignatureError::LengthMismatch("ring", "responses"))
        }
        if self.c.is_zero() {
            return Err(SignatureError::InvalidParams("c".to_owned()))
        }
        if self.cpi.is_zero() {
            return Err(SignatureError::InvalidParams("cpi must be > 0".to_owned()))
        }
        if self.alpha.is_zero() {
            return Err(SignatureError::InvalidParams("alpha must be > 0".to_owned()))
        }
        check_ring(&self.ring, self.curve, false)?;

        let n = self.curve.n();
        if !in_scalar_range(signer_response, n) || !self.responses.iter().all(|r| in_scalar_range(r, n)) {
            return Err(SignatureError::InvalidResponses)
        }

        let Self{message, ring, c, pi, mut responses, curve, hash_config, ..} = self;
        responses.insert(pi, signer_response.clone());
        return Ok(RingSignature::new(message, ring, c, responses, curve, hash_config))
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

    ///The challenge the signer must answer.
    pub fn cpi(&self) -> &BigUint {
        return &self.cpi
    }

    ///The signer's position in the ring.
    pub fn pi(&self) -> usize {
        return self.pi
    }

    pub fn alpha(&self) -> &BigUint {
        return &self.alpha
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
    struct PartialSignatureJson<'a> {
        message: &'a str,
        ring: Vec<String>,
        c: String,
        cpi: String,
        pi: usize,
        alpha: String,
        responses: Vec<String>,
        curve: CurveJson,
        config: ConfigJson
    }

    impl ToBytes for PartialSignature {
        fn to_json(&self) -> Result<String, SerializationError> {
            return to_json_string(&PartialSignatureJson{
                message: encode_message(&self.message)?,
                ring: encode_points(&self.ring),
                c: self.c.to_string(),
                cpi: self.cpi.to_string(),
                pi: self.pi,
                alpha: self.alpha.to_string(),
                responses: encode_scalars(&self.responses),
                curve: CurveJson::new(self.curve),
                config: ConfigJson::new(self.hash_config)
            })
        }

        fn from_json(json: &str) -> Result<Self, SignatureError> {
            let object = parse_object(json)?;
            let message = parse_message(&object)?;
            let c = parse_scalar(&object, "c")?;
            let cpi = parse_scalar(&object, "cpi")?;
            let alpha = parse_scalar(&object, "alpha")?;
            let responses = parse_scalars(&object, "responses")?;
            let pi = parse_index(&object, "pi")?;
            let curve = parse_curve(&object)?;
            let ring = parse_ring(&object, curve)?;
            let hash_config = parse_hash_config(&object)?;

            return Ok(PartialSignature::new(message, ring, c, cpi, pi, alpha, responses, curve, hash_config))
        }
    }
}
