/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Message digests used by the ring signature challenge chain.

use std::fmt::Display;

use blake2::{
    Blake2b,
    digest::consts::U32
};
use num_bigint::BigUint;
use sha2::{Digest, Sha256, Sha512};
use sha3::{Keccak256, Sha3_256, Sha3_512};

use crate::errors::SignatureError;

type Blake2b256 = Blake2b<U32>;

///Hash function used for the message digest and the challenge chain.
///
///The selection travels with every signature instead of being a global setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashConfig {
    #[default]
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
    Keccak256,
    Blake2b256

} impl HashConfig {
    ///Every supported hash function.
    pub const ALL: [HashConfig; 6] = [
        Self::Sha256, Self::Sha512, Self::Sha3_256, Self::Sha3_512, Self::Keccak256, Self::Blake2b256
    ];

    ///Name used in serialized signatures.
    pub fn name(&self) -> &'static str {
        return match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Sha3_256 => "sha3-256",
            Self::Sha3_512 => "sha3-512",
            Self::Keccak256 => "keccak256",
            Self::Blake2b256 => "blake2b256"
        }
    }

    ///Look up a hash function by its serialized name.
    pub fn from_name(name: &str) -> Result<Self, SignatureError> {
        return Self::ALL.into_iter()
            .find(|config| config.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SignatureError::InvalidJson(format!("unsupported hash function: {name}")))
    }

    ///Hash bytes to bytes.
    pub fn digest(&self, msg: &[u8]) -> Vec<u8> {
        return match self {
            Self::Sha256 => Sha256::digest(msg).to_vec(),
            Self::Sha512 => Sha512::digest(msg).to_vec(),
            Self::Sha3_256 => Sha3_256::digest(msg).to_vec(),
            Self::Sha3_512 => Sha3_512::digest(msg).to_vec(),
            Self::Keccak256 => Keccak256::digest(msg).to_vec(),
            Self::Blake2b256 => Blake2b256::digest(msg).to_vec()
        }
    }

    ///Hash bytes to a scalar: the digest read big-endian, reduced modulo `n`.
    pub fn hash_to_scalar(&self, msg: &[u8], n: &BigUint) -> BigUint {
        return BigUint::from_bytes_be(&self.digest(msg)) % n
    }

    ///Hash bytes to bytes, domain separated.
    pub fn domain_digest(&self, msg: &[u8], domain: &[u8]) -> Vec<u8> {
        return self.digest(&[msg, domain].concat())
    }

} impl Display for HashConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub mod domains {
    //! Pre-defined hash domains

    pub const TRANSPORT_ENCRYPTION_KEY: &[u8] =     "ringsig_enc".as_bytes();
    pub const TRANSPORT_MAC_KEY: &[u8] =            "ringsig_mac".as_bytes();
}
