// SPDX short identifier: Unlicense

use ringsig::{
    ToBytes,
    curve::{
        Curve,
        random_point
    },
    hashes::HashConfig,
    keys::PrivateKey,
    signature::{
        PartialSignature,
        RingSignature
    },
    transport::EciesTransport
};

const RINGSIZE: usize = 8;

fn main() {
    //See the ring signature example before this

    let curve = Curve::Ed25519;

    //The key holder (e.g. a hardware wallet or a custodian).
    //The coordinator only ever sees its public key.
    let custodian_key = PrivateKey::generate(curve);
    let custodian_public = custodian_key.public_key(curve).unwrap();

    let ring: Vec<_> = (0..(RINGSIZE - 1)).map(|_| random_point(curve)).collect();
    let message = b"this is a test";

    //The coordinator runs every step of signing except the last one,
    //and encrypts the result to the custodian.
    //A partial signature contains the nonce, so it should never be sent in the clear.
    let transport = EciesTransport::new(curve, HashConfig::Sha256);
    let ciphertext = PartialSignature::partial_sign_encrypted(
        &ring,
        message,
        &custodian_public,  //the signer
        curve,
        HashConfig::Sha256,
        &transport,
        &custodian_public   //the recipient
    ).expect("Real software should have proper error handling.");

    //The custodian decrypts it and answers with a single scalar.
    let partial = PartialSignature::decrypt(&ciphertext, &transport, &custodian_key)
        .expect("Real software should have proper error handling.");
    let response = partial.signer_response(&custodian_key).unwrap();

    //Anyone holding the partial signature and the response can complete it.
    //`combine` consumes the partial signature, so it can only be completed once.
    let signature = partial.combine(&response).unwrap();
    assert!(signature.verify().unwrap());

    //Signatures travel as base64 JSON.
    let encoded = signature.to_base64().unwrap();
    let decoded = RingSignature::from_base64(&encoded).unwrap();
    assert_eq!(decoded, signature);
}
