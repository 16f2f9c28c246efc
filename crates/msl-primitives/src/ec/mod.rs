/// Elliptic curve cryptography on secp256k1.
///
/// Provides private keys, public keys, ECDSA signatures and ECIES
/// hybrid encryption.

pub mod private_key;
pub mod public_key;
pub mod signature;
pub mod ecies;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;

/// Name of the curve every key in this module lives on.
pub const CURVE_NAME: &str = "secp256k1";
