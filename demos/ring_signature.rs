// SPDX short identifier: Unlicense

use ringsig::{
    curve::{
        Curve,
        random_point
    },
    hashes::HashConfig,
    keys::PrivateKey,
    signature::RingSignature
};

const RINGSIZE: usize = 16;

fn main() {
    let curve = Curve::Secp256k1;

    //Create the signer's private key.
    //In practice this would be loaded from wherever the key is stored,
    //but for demonstration it will just be randomly generated.
    let signer_key = PrivateKey::generate(curve);

    //Public keys of other users, to act as decoys for the signer.
    //The signer's own public key is added to the ring at a random position while signing.
    let ring: Vec<_> = (0..(RINGSIZE - 1))
        .map(|_| random_point(curve))
        .collect();

    //The message to be signed and verified
    let message = b"this is a test";

    //Create a ring signature
    let signature = RingSignature::sign(
        &ring,
        &signer_key,
        message,
        curve,
        HashConfig::Sha256     //the hash function travels with the signature
    ).expect("Real software should have proper error handling.");
    assert_eq!(signature.ring().len(), RINGSIZE);

    //Verify the signature.
    //Only the signature itself is needed: it carries the ring, the message, the curve and the hash.
    assert!(signature.verify().expect("Real software should have proper error handling."));

    //The same key works on Ed25519, where private keys are expanded from a seed like EdDSA keys.
    let curve = Curve::Ed25519;
    let ring: Vec<_> = (0..(RINGSIZE - 1)).map(|_| random_point(curve)).collect();
    let signature = RingSignature::sign(&ring, &signer_key, message, curve, HashConfig::Blake2b256).unwrap();
    assert!(signature.verify().unwrap());
}
