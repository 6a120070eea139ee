/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::collections::HashSet;

use num_traits::Zero;
use rand::{CryptoRng, Rng};

use crate::internal_common::*;

///Check that `point` is a valid point on `curve`.
pub fn check_point(point: &Point, curve: Curve) -> Result<(), SignatureError> {
    if !curve.is_on_curve(point) {
        return Err(SignatureError::InvalidPoint(None))
    }
    return Ok(())
}

///Check that every ring member is a valid point on `curve` and that no member appears twice.
///
///An empty ring is only accepted when `allow_empty` is set.
pub fn check_ring(ring: &[Point], curve: Curve, allow_empty: bool) -> Result<(), SignatureError> {
    if ring.is_empty() {
        return match allow_empty {
            true => Ok(()),
            false => Err(SignatureError::EmptyRing)
        }
    }

    for (i, point) in ring.iter().enumerate() {
        if !curve.is_on_curve(point) {
            return Err(SignatureError::InvalidPoint(Some(i)))
        }
    }

    let mut seen: HashSet<&Point> = HashSet::with_capacity(ring.len());
    if !ring.iter().all(|point| seen.insert(point)) {
        return Err(SignatureError::DuplicateRingMember)
    }
    return Ok(())
}

///Concatenated compressed encodings of the ring members.
pub(crate) fn encode_ring(ring: &[Point]) -> Vec<u8> {
    return ring.iter()
        .flat_map(|point| point.to_compressed_bytes())
        .collect()
}

///The challenge chain of one ring and message.
///
///Every link hashes `ring ‖ H(message) ‖ enc(point)` to a scalar,
///so the ring and the message digest are encoded once and reused.
pub(crate) struct Chain {
    curve: Curve,
    hash_config: HashConfig,
    prefix: Vec<u8>,
    members: Vec<Coordinates>,
    generator: Coordinates

} impl Chain {
    ///The ring must already have passed `check_ring`.
    pub fn new(ring: &[Point], message: &[u8], curve: Curve, hash_config: HashConfig) -> Result<Self, SignatureError> {
        let prefix = [encode_ring(ring), hash_config.digest(message)].concat();
        let members = ring.iter()
            .map(|point| curve.lift(point))
            .collect::<Result<Vec<Coordinates>, CurveError>>()?;

        return Ok(Self{curve, hash_config, prefix, members, generator: curve.generator_coordinates()})
    }

    fn challenge(&self, point: &Coordinates) -> BigUint {
        let encoded = self.curve.encode_coordinates(point);
        return self.hash_config.hash_to_scalar(&[self.prefix.as_slice(), &encoded].concat(), self.curve.n())
    }

    ///`Hash(ring ‖ H ‖ enc(G·alpha))`, the challenge following the signer's slot.
    pub fn seed(&self, alpha: &BigUint) -> Result<BigUint, SignatureError> {
        let commitment = self.curve.mul_coordinates(&self.generator, alpha)?;
        return Ok(self.challenge(&commitment))
    }

    ///`Hash(ring ‖ H ‖ enc(G·r + K_i·c))`, the challenge following slot `i`.
    pub fn link(&self, response: &BigUint, c: &BigUint, i: usize) -> Result<BigUint, SignatureError> {
        let gr = self.curve.mul_coordinates(&self.generator, response)?;
        let kc = self.curve.mul_coordinates(&self.members[i], c)?;
        return Ok(self.challenge(&self.curve.add_coordinates(&gr, &kc)))
    }

    ///Same as `link`, for published values: scalars are reduced modulo `N` instead of rejected.
    pub fn link_public(&self, response: &BigUint, c: &BigUint, i: usize) -> BigUint {
        let gr = self.curve.mul_coordinates_unsafe(&self.generator, response);
        let kc = self.curve.mul_coordinates_unsafe(&self.members[i], c);
        return self.challenge(&self.curve.add_coordinates(&gr, &kc))
    }
}

///Chain state shared by `sign` and `partial_sign`: everything up to the signer's response.
pub(crate) struct OpenChain {
    pub ring: Vec<Point>,
    pub pi: usize,
    pub alpha: BigUint,
    pub c0: BigUint,
    pub cpi: BigUint,
    ///One entry per ring member; slot `pi` is a placeholder.
    pub responses: Vec<BigUint>
}

///Insert `signer` into `ring` at a random slot and walk the challenge chain
///all the way around to the signer's slot.
pub(crate) fn open_chain<R: Rng + CryptoRng + ?Sized>(
    ring: &[Point], signer: &Point, message: &[u8], curve: Curve, hash_config: HashConfig, rng: &mut R
) -> Result<OpenChain, SignatureError> {
    check_ring(ring, curve, true)?;
    check_point(signer, curve)?;

    let pi = rng.gen_range(0..=ring.len());
    let mut full_ring: Vec<Point> = Vec::with_capacity(ring.len() + 1);
    full_ring.extend_from_slice(&ring[..pi]);
    full_ring.push(signer.clone());
    full_ring.extend_from_slice(&ring[pi..]);
    check_ring(&full_ring, curve, false)?;

    let n = full_ring.len();
    let alpha = random_scalar_with(curve, rng);
    let mut responses: Vec<BigUint> = (0..n)
        .map(|i| match i == pi {
            true => BigUint::zero(),
            false => random_scalar_with(curve, rng)
        })
        .collect();

    let chain = Chain::new(&full_ring, message, curve, hash_config)?;
    let mut c: Vec<BigUint> = vec![BigUint::zero(); n];
    c[(pi + 1) % n] = chain.seed(&alpha)?;
    for step in 1..n {
        let i = (pi + step) % n;
        c[(i + 1) % n] = chain.link(&responses[i], &c[i], i)?;
    }

    let c0 = c[0].clone();
    let cpi = std::mem::take(&mut c[pi]);
    return Ok(OpenChain{ring: full_ring, pi, alpha, c0, cpi, responses})
}

///Walk the chain once around from `c0` and check that it closes.
///
///Never fails: any malformed value simply does not verify.
pub(crate) fn close_chain(
    ring: &[Point], responses: &[BigUint], c0: &BigUint, message: &[u8], curve: Curve, hash_config: HashConfig
) -> bool {
    let n = curve.n();
    if responses.len() != ring.len() {
        return false
    }
    if !in_scalar_range(c0, n) || !responses.iter().all(|r| in_scalar_range(r, n)) {
        return false
    }
    if check_ring(ring, curve, false).is_err() {
        return false
    }
    let chain = match Chain::new(ring, message, curve, hash_config) {
        Ok(chain) => chain,
        Err(_) => return false
    };

    let mut c = c0.clone();
    for (i, response) in responses.iter().enumerate() {
        c = chain.link_public(response, &c, i);
    }
    return &c == c0
}
