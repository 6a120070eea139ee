// SPDX short identifier: Unlicense

use ringsig::{
    common::*,
    signature::{
        PartialSignature,
        RingSignature,
        SchnorrResponse
    },
    transport::{
        EciesTransport,
        Transport
    }
};

const RING_SIZES: [usize; 5] = [0, 1, 2, 5, 20];

fn random_ring(curve: Curve, size: usize) -> Vec<Point> {
    return (0..size).map(|_| random_point(curve)).collect()
}

///Every field of a partial signature, so single fields can be broken.
struct Parts {
    message: Vec<u8>,
    ring: Vec<Point>,
    c: BigUint,
    cpi: BigUint,
    pi: usize,
    alpha: BigUint,
    responses: Vec<BigUint>,
    curve: Curve,
    hash_config: HashConfig
}

impl Parts {
    fn honest(curve: Curve, key: &PrivateKey) -> Self {
        let partial = PartialSignature::partial_sign(
            &random_ring(curve, 3), b"abcdef", &key.public_key(curve).unwrap(), curve, HashConfig::default()
        ).unwrap();
        return Self{
            message: partial.message().to_vec(),
            ring: partial.ring().to_vec(),
            c: partial.c().clone(),
            cpi: partial.cpi().clone(),
            pi: partial.pi(),
            alpha: partial.alpha().clone(),
            responses: partial.responses().to_vec(),
            curve: partial.curve(),
            hash_config: partial.hash_config()
        }
    }

    fn into_partial(self) -> PartialSignature {
        return PartialSignature::new(
            self.message, self.ring, self.c, self.cpi, self.pi, self.alpha, self.responses, self.curve, self.hash_config
        )
    }
}

fn combine_with(key: &PrivateKey, parts: Parts) -> Result<RingSignature, SignatureError> {
    let partial = parts.into_partial();
    let response = partial.signer_response(key).unwrap();
    return partial.combine(&response)
}

#[test]
fn partial_then_combine() {
    for curve in Curve::ALL {
        for x in RING_SIZES {
            let key = PrivateKey::generate(curve);
            let public_key = key.public_key(curve).unwrap();
            let ring = random_ring(curve, x);

            let partial = PartialSignature::partial_sign(&ring, b"abcdef", &public_key, curve, HashConfig::default()).unwrap();
            assert_eq!(partial.ring().len(), x + 1);
            assert_eq!(partial.responses().len(), x);
            assert_eq!(partial.ring()[partial.pi()], public_key);

            //the external signer only needs alpha, cpi and the private key
            let response = SchnorrResponse::compute_with_key(partial.alpha(), partial.cpi(), &key, curve).unwrap();
            assert_eq!(response, partial.signer_response(&key).unwrap());
            assert!(SchnorrResponse::verify(partial.alpha(), &public_key, partial.cpi(), &response, curve).unwrap());

            let signature = partial.combine(&response).unwrap();
            assert_eq!(signature.ring().len(), x + 1);
            assert!(signature.verify().unwrap());

            //same as signing directly
            let direct = RingSignature::sign(&ring, &key, b"abcdef", curve, HashConfig::default()).unwrap();
            assert_eq!(direct.verify().unwrap(), signature.verify().unwrap());
        }
    }
}

#[test]
fn wrong_response_does_not_verify() {
    for curve in Curve::ALL {
        let key = PrivateKey::generate(curve);
        let public_key = key.public_key(curve).unwrap();

        //off by one
        let partial = PartialSignature::partial_sign(&random_ring(curve, 3), b"abcdef", &public_key, curve, HashConfig::default()).unwrap();
        let response = (partial.signer_response(&key).unwrap() + 1u32) % curve.n();
        assert!(!partial.combine(&response).unwrap().verify().unwrap());

        //another key
        let other = PrivateKey::generate(curve);
        let partial = PartialSignature::partial_sign(&random_ring(curve, 3), b"abcdef", &public_key, curve, HashConfig::default()).unwrap();
        let response = partial.signer_response(&other).unwrap();
        assert!(!partial.combine(&response).unwrap().verify().unwrap());
    }
}

#[test]
fn tampered_fields_do_not_verify() {
    let curve = Curve::Secp256k1;
    let key = PrivateKey::generate(curve);
    let n = curve.n();

    //alpha bound to another nonce
    let mut parts = Parts::honest(curve, &key);
    parts.alpha = (&parts.alpha + 1u32) % n;
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());

    //cpi
    let mut parts = Parts::honest(curve, &key);
    parts.cpi = (&parts.cpi + 1u32) % n;
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());

    //c
    let mut parts = Parts::honest(curve, &key);
    parts.c = (&parts.c + 1u32) % n;
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());

    //an existing response
    let mut parts = Parts::honest(curve, &key);
    parts.responses[0] = (&parts.responses[0] + 1u32) % n;
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());

    //the message
    let mut parts = Parts::honest(curve, &key);
    parts.message = b"abcdeg".to_vec();
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());

    //a ring member
    let mut parts = Parts::honest(curve, &key);
    let i = (parts.pi + 1) % parts.ring.len();
    parts.ring[i] = random_point(curve);
    assert!(!combine_with(&key, parts).unwrap().verify().unwrap());
}

#[test]
fn combine_checks() {
    let curve = Curve::Ed25519;
    let key = PrivateKey::generate(curve);
    let response = BigUint::from(1u32);

    let mut parts = Parts::honest(curve, &key);
    parts.message = Vec::new();
    parts.ring = Vec::new();
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::NoEmptyMessage));

    let mut parts = Parts::honest(curve, &key);
    parts.ring = Vec::new();
    parts.c = BigUint::from(0u32);
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::EmptyRing));

    let mut parts = Parts::honest(curve, &key);
    parts.pi = parts.ring.len();
    parts.responses.pop();
    assert_eq!(
        parts.into_partial().combine(&response),
        Err(SignatureError::InvalidParams("pi must be < ring.length".to_owned()))
    );

    let mut parts = Parts::honest(curve, &key);
    parts.responses.pop();
    parts.c = BigUint::from(0u32);
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::LengthMismatch("ring", "responses")));

    //responses must skip the signer's slot
    let mut parts = Parts::honest(curve, &key);
    parts.responses.push(BigUint::from(1u32));
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::LengthMismatch("ring", "responses")));

    let mut parts = Parts::honest(curve, &key);
    parts.c = BigUint::from(0u32);
    parts.cpi = BigUint::from(0u32);
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::InvalidParams("c".to_owned())));

    let mut parts = Parts::honest(curve, &key);
    parts.cpi = BigUint::from(0u32);
    parts.alpha = BigUint::from(0u32);
    assert_eq!(
        parts.into_partial().combine(&response),
        Err(SignatureError::InvalidParams("cpi must be > 0".to_owned()))
    );

    let mut parts = Parts::honest(curve, &key);
    parts.alpha = BigUint::from(0u32);
    parts.ring[0] = parts.ring[1].clone();
    assert_eq!(
        parts.into_partial().combine(&response),
        Err(SignatureError::InvalidParams("alpha must be > 0".to_owned()))
    );

    let mut parts = Parts::honest(curve, &key);
    parts.ring[0] = parts.ring[1].clone();
    parts.responses[0] = BigUint::from(0u32);
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::DuplicateRingMember));

    let mut parts = Parts::honest(curve, &key);
    parts.ring[2] = Point::from_affine_unchecked(curve, BigUint::from(0u32), BigUint::from(1u32));
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::InvalidPoint(Some(2))));

    let mut parts = Parts::honest(curve, &key);
    parts.responses[0] = BigUint::from(0u32);
    assert_eq!(parts.into_partial().combine(&response), Err(SignatureError::InvalidResponses));

    let parts = Parts::honest(curve, &key);
    assert_eq!(parts.into_partial().combine(&BigUint::from(0u32)), Err(SignatureError::InvalidResponses));

    let parts = Parts::honest(curve, &key);
    assert_eq!(parts.into_partial().combine(curve.n()), Err(SignatureError::InvalidResponses));
}

#[test]
fn invalid_signer_key() {
    let curve = Curve::Secp256k1;
    let off_curve = Point::from_affine_unchecked(curve, BigUint::from(1u32), BigUint::from(1u32));
    assert_eq!(
        PartialSignature::partial_sign(&random_ring(curve, 2), b"abcdef", &off_curve, curve, HashConfig::default()),
        Err(SignatureError::InvalidPoint(None))
    );

    let member = random_point(curve);
    assert_eq!(
        PartialSignature::partial_sign(&[member.clone()], b"abcdef", &member, curve, HashConfig::default()),
        Err(SignatureError::DuplicateRingMember)
    );
}

#[test]
fn ecies_round_trip() {
    for curve in Curve::ALL {
        for hash_config in [HashConfig::Sha256, HashConfig::Sha512, HashConfig::Blake2b256] {
            let transport = EciesTransport::new(curve, hash_config);
            let key = PrivateKey::generate(curve);
            let recipient = key.public_key(curve).unwrap();
            let plaintext: Vec<u8> = (0..200u8).collect();

            let ciphertext = transport.encrypt(&plaintext, &recipient).unwrap();
            assert_ne!(&ciphertext[33..233], plaintext.as_slice());
            assert_eq!(transport.decrypt(&ciphertext, &key).unwrap(), plaintext);

            //encryption is randomized
            assert_ne!(transport.encrypt(&plaintext, &recipient).unwrap(), ciphertext);

            //empty plaintext
            let empty = transport.encrypt(&[], &recipient).unwrap();
            assert_eq!(transport.decrypt(&empty, &key).unwrap(), Vec::<u8>::new());
        }
    }
}

#[test]
fn ecies_rejects_tampering() {
    let curve = Curve::Secp256k1;
    let transport = EciesTransport::new(curve, HashConfig::Sha256);
    let key = PrivateKey::generate(curve);
    let ciphertext = transport.encrypt(b"partial signature", &key.public_key(curve).unwrap()).unwrap();

    for i in 0..ciphertext.len() {
        let mut tampered = ciphertext.clone();
        tampered[i] ^= 0x01;
        assert!(transport.decrypt(&tampered, &key).is_err());
    }

    let other = PrivateKey::generate(curve);
    assert_eq!(transport.decrypt(&ciphertext, &other), Err(SignatureError::DecryptionFailed));
    assert_eq!(transport.decrypt(&ciphertext[..40], &key), Err(SignatureError::DecryptionFailed));
    assert_eq!(transport.decrypt(&ciphertext[..ciphertext.len() - 1], &key), Err(SignatureError::DecryptionFailed));

    let mut appended = ciphertext.clone();
    appended.push(0);
    assert_eq!(transport.decrypt(&appended, &key), Err(SignatureError::DecryptionFailed));
}

#[cfg(feature = "serialization")]
#[test]
fn encrypted_partial_signature() {
    for curve in Curve::ALL {
        let transport = EciesTransport::new(curve, HashConfig::Sha256);
        let key = PrivateKey::generate(curve);
        let public_key = key.public_key(curve).unwrap();
        let ring = random_ring(curve, 4);

        //the key holder is also the recipient
        let ciphertext = PartialSignature::partial_sign_encrypted(
            &ring, b"abcdef", &public_key, curve, HashConfig::Sha3_256, &transport, &public_key
        ).unwrap();

        let partial = PartialSignature::decrypt(&ciphertext, &transport, &key).unwrap();
        assert_eq!(partial.hash_config(), HashConfig::Sha3_256);
        let response = partial.signer_response(&key).unwrap();
        assert!(partial.combine(&response).unwrap().verify().unwrap());

        let other = PrivateKey::generate(curve);
        assert!(PartialSignature::decrypt(&ciphertext, &transport, &other).is_err());
    }
}
