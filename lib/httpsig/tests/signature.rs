use httpsig::{
    key::{RawKey, SshKey},
    Algorithm, Authorization, Challenge, Key, Keychain, RequestContent, Signer, Verifier,
};
use proptest::{prop_assert_eq, proptest, sample::subsequence, strategy::Strategy};
use std::{sync::Arc, time::Duration};

mod data;

fn sign_and_verify(signing_key: Arc<dyn Key>, verifying_key: Arc<dyn Key>) {
    let challenge = data::challenge();
    let content = data::request_content();

    let mut signer = Signer::new([signing_key].into_iter().collect());
    signer.rotate_keys(&challenge).unwrap();
    let authorization = signer.sign(&content).unwrap();

    // Travels through the header form
    let authorization = Authorization::parse(&authorization.header_value()).unwrap();

    let verifier = Verifier::new([verifying_key].into_iter().collect());
    assert!(verifier.verify(&challenge, &content, Some(&authorization)));
}

fn rsa_keys() -> [Arc<dyn Key>; 3] {
    [
        Arc::new(RawKey::from_pem(data::RSA_PKCS1).unwrap()),
        Arc::new(SshKey::from_openssh(data::RSA_OPENSSH).unwrap()),
        Arc::new(SshKey::from_public(data::RSA_PUBLIC_OPENSSH).unwrap()),
    ]
}

fn ed25519_keys() -> [Arc<dyn Key>; 3] {
    [
        Arc::new(RawKey::from_pem(data::ED25519_PKCS8).unwrap()),
        Arc::new(SshKey::from_openssh(data::ED25519_OPENSSH).unwrap()),
        Arc::new(RawKey::from_public_pem(data::ED25519_PUBLIC_PEM).unwrap()),
    ]
}

#[test]
fn raw_and_ssh_keys_interoperate() {
    let key_sets: [fn() -> [Arc<dyn Key>; 3]; 2] = [rsa_keys, ed25519_keys];

    for keys in key_sets {
        let [raw, ssh, _] = keys();
        for signing_key in [raw, ssh] {
            for verifying_key in keys() {
                sign_and_verify(signing_key.clone(), verifying_key);
            }
        }
    }
}

#[test]
fn golden_signatures() {
    let content = data::request_content();
    let rsa = RawKey::from_pem(data::RSA_PKCS1).unwrap();
    let ed25519 = SshKey::from_openssh(data::ED25519_OPENSSH).unwrap();

    let rsa_public: Arc<dyn Key> = Arc::new(RawKey::from_pem(data::RSA_PKCS8).unwrap().public_key());
    let ed25519_public: Arc<dyn Key> =
        Arc::new(SshKey::from_public(data::ED25519_PUBLIC_OPENSSH).unwrap());
    let verifier = Verifier::new([rsa_public, ed25519_public].into_iter().collect());

    for (key, algorithm, expected) in [
        (&rsa as &dyn Key, Algorithm::RsaSha256, data::RSA_SHA256_SIGNATURE),
        (&ed25519 as &dyn Key, Algorithm::Ed25519, data::ED25519_SIGNATURE),
    ] {
        let authorization = Authorization::parse(&format!(
            r#"keyId="{}" algorithm="{algorithm}" headers="(request-target) host date" signature="{expected}""#,
            key.id(),
        ))
        .unwrap();

        let signing_string = content.signing_string(data::SIGNED_HEADERS).unwrap();
        assert_eq!(
            key.sign(algorithm, signing_string.as_bytes()).unwrap(),
            authorization.signature()
        );

        assert!(verifier.verify(&data::challenge(), &content, Some(&authorization)));
    }
}

#[test]
fn signer_prefers_key_order() {
    let mut keychain = Keychain::new();
    keychain.push(SshKey::from_openssh(data::ED25519_OPENSSH).unwrap());
    keychain.push(RawKey::from_pem(data::RSA_PKCS1).unwrap());

    let mut signer = Signer::new(keychain);
    let rsa_only = Challenge::new("example", ["date"], [Algorithm::RsaSha512]);
    signer.rotate_keys(&rsa_only).unwrap();

    let authorization = signer.sign(&data::request_content()).unwrap();
    assert_eq!(authorization.key_id(), data::RSA_FINGERPRINT);
    assert_eq!(authorization.algorithm(), Algorithm::RsaSha512);
}

#[test]
fn tampering_is_detected() {
    let challenge = data::challenge();
    let content = data::request_content();
    let key: Arc<dyn Key> = Arc::new(RawKey::from_pem(data::ED25519_PKCS8).unwrap());

    let mut signer = Signer::new([key.clone()].into_iter().collect());
    let verifier = Verifier::new([key].into_iter().collect());
    signer.rotate_keys(&challenge).unwrap();
    let authorization = signer.sign(&content).unwrap();

    // Flipped bit in the signature
    let mut signature = authorization.signature().to_vec();
    signature[0] ^= 1;
    let forged = Authorization::new(
        authorization.key_id(),
        authorization.algorithm(),
        authorization.headers(),
        signature,
    );
    assert!(!verifier.verify(&challenge, &content, Some(&forged)));

    // Changed header value
    let tampered = RequestContent::builder()
        .request_target("POST", "/inbox")
        .header("Host", "evil.example")
        .header("Date", data::DATE)
        .build()
        .unwrap();
    assert!(!verifier.verify(&challenge, &tampered, Some(&authorization)));

    // Changed path
    let tampered = RequestContent::builder()
        .request_target("POST", "/outbox")
        .header("Host", "example.com")
        .header("Date", data::DATE)
        .build()
        .unwrap();
    assert!(!verifier.verify(&challenge, &tampered, Some(&authorization)));

    // Truncated signature
    let truncated = Authorization::new(
        authorization.key_id(),
        authorization.algorithm(),
        authorization.headers(),
        authorization.signature()[..10].to_vec(),
    );
    assert!(!verifier.verify(&challenge, &content, Some(&truncated)));

    assert!(verifier.verify(&challenge, &content, Some(&authorization)));
}

#[test]
fn stale_requests_are_rejected() {
    let key: Arc<dyn Key> = Arc::new(RawKey::from_pem(data::RSA_PKCS8).unwrap());
    let mut signer = Signer::new([key.clone()].into_iter().collect());
    let authorization = signer.sign(&data::request_content()).unwrap();

    let challenge = Challenge::new("example", ["date"], Algorithm::ALL.iter().copied());
    let verifier = Verifier::new([key].into_iter().collect());
    assert!(verifier.verify(&challenge, &data::request_content(), Some(&authorization)));

    let verifier = verifier.with_max_age(Duration::from_secs(300));
    assert!(!verifier.verify(&challenge, &data::request_content(), Some(&authorization)));

    let content = RequestContent::builder()
        .request_target("POST", "/inbox")
        .date_now()
        .build()
        .unwrap();
    let authorization = signer.sign(&content).unwrap();
    assert!(verifier.verify(&challenge, &content, Some(&authorization)));
}

const HEADERS: &[(&str, &str)] = &[
    ("Host", "example.com"),
    ("Date", data::DATE),
    ("Content-Type", "application/json"),
    ("Digest", "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE="),
    ("Content-Length", "18"),
];

proptest! {
    #[test]
    fn canonical_form_ignores_header_order(
        order in subsequence((0..HEADERS.len()).collect::<Vec<_>>(), HEADERS.len())
            .prop_shuffle(),
    ) {
        let mut builder = RequestContent::builder();
        builder.request_target("POST", "/inbox");
        for idx in order {
            let (name, value) = HEADERS[idx];
            builder.header(name, value);
        }
        let shuffled = builder.build().unwrap();

        let mut builder = RequestContent::builder();
        builder.request_target("POST", "/inbox");
        for (name, value) in HEADERS {
            builder.header(name.to_uppercase(), value);
        }
        let ordered = builder.build().unwrap();

        let names = ["digest", "(request-target)", "host", "date", "content-length", "content-type"];
        prop_assert_eq!(
            shuffled.signing_string(names).unwrap(),
            ordered.signing_string(names).unwrap()
        );
        prop_assert_eq!(shuffled, ordered);
    }
}
