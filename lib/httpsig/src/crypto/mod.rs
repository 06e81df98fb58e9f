//!
//! Common cryptographic operations
//!

mod sign;
mod verify;

pub mod parse;
pub mod ssh;

pub use self::sign::SigningKey;
pub use self::verify::VerifyingKey;
