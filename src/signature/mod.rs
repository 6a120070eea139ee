/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Ring signatures
//!
//!Given a private key and a ring of public keys, create a signature which proves that
//!the holder of one of the ring's private keys signed a message, without revealing which one.
//!
//!Signing can also be split in two: a coordinator who knows only the signer's public key
//!builds a `PartialSignature`, the key holder answers it with a single scalar,
//!and `combine` turns both into a `RingSignature`.

mod ring_signature;
mod partial;
mod schnorr;
mod signature_utils;

pub use ring_signature::RingSignature;
pub use partial::PartialSignature;
pub use schnorr::SchnorrResponse;
pub use signature_utils::{
    check_ring,
    check_point
};
