#![allow(dead_code)]

use httpsig::{Challenge, RequestContent};

pub const RSA_PKCS1: &str = include_str!("keys/id_rsa.pem");
pub const RSA_PKCS8: &str = include_str!("keys/id_rsa.pk8.pem");
pub const RSA_PUBLIC_PEM: &str = include_str!("keys/id_rsa.pub.pem");
pub const RSA_OPENSSH: &str = include_str!("keys/id_rsa");
pub const RSA_OPENSSH_ENCRYPTED: &str = include_str!("keys/id_rsa_withpass");
pub const RSA_PUBLIC_OPENSSH: &str = include_str!("keys/id_rsa.pub");
pub const RSA_FINGERPRINT: &str = "SHA256:9Kml7XqRy6nXKcNTHCLmwLTuKqwKqPNRTdOeTQmTDag";

pub const ED25519_PKCS8: &str = include_str!("keys/id_ed25519.pk8.pem");
pub const ED25519_PUBLIC_PEM: &str = include_str!("keys/id_ed25519.pub.pem");
pub const ED25519_OPENSSH: &str = include_str!("keys/id_ed25519");
pub const ED25519_PUBLIC_OPENSSH: &str = include_str!("keys/id_ed25519.pub");
pub const ED25519_FINGERPRINT: &str = "SHA256:7axzx9KJ/I6/84Q3ef5sDXbtTn3aWgDgygdKldcJYAU";

pub const PASSPHRASE: &str = "dummydummy";
pub const DATE: &str = "Sun, 05 Jan 2014 21:31:40 GMT";
pub const SIGNED_HEADERS: &[&str] = &["(request-target)", "host", "date"];

/// Signature of [`request_content`] over [`SIGNED_HEADERS`] with the RSA key (`rsa-sha256`)
pub const RSA_SHA256_SIGNATURE: &str = "HLWckHyLFbYP6Mjts1j37OXiVCRBp0mkpFhHEdihtbrk60toErL4D9h8v2SDHyLuQpnOtYmC9NVSsMvEyKR66ZF+09sqXnQZI2JGNrJPWVu/26QCXfhdViCztLueJxSDYE3efX8zdtedxGqwpiZfftruGYgNT8nPoPv+d6EAPpU/uGpE3lqNDXwxBspvOMRnE5rPKVJsBvm55BkqAfod9+nDqfCbRDYsJkfKHtssGhM49OwvYF9MjrfVBvMuSoBUyPjh04zmjDVc40YNEImGYVJTHdBpcEFmoywcbmQYNAEjnOjQtsf3eBPQUklWN+vIsfbeVEaY90fx91bwLjpjCg==";

/// Signature of [`request_content`] over [`SIGNED_HEADERS`] with the Ed25519 key
pub const ED25519_SIGNATURE: &str =
    "cpj8wKzYKRx3+CXbvU5Ss9zZ7ZCJHkiqLf4yZIYG/qG8RtyOnTOsXOqPOAFAJncgyIomKhq2CcvARW1nY2euBg==";

pub fn request_content() -> RequestContent {
    RequestContent::builder()
        .request_target("POST", "/inbox")
        .header("Host", "example.com")
        .header("Date", DATE)
        .header("Content-Type", "application/activity+json")
        .build()
        .unwrap()
}

pub fn challenge() -> Challenge {
    Challenge::parse(
        r#"Signature realm="example" headers="(request-target) host date" algorithms="rsa-sha256 rsa-sha512 ed25519""#,
    )
    .unwrap()
}
