/// MSL cryptographic primitives.
///
/// This crate provides the building blocks behind the MSL crypto contexts:
/// - SHA-256
/// - Elliptic curve cryptography (secp256k1 keys, ECDSA signatures, ECDH)
/// - ECIES hybrid encryption (ECDH + HKDF-SHA256 + AES-256-GCM)
/// - Variable-length integer encoding and a cursor-based binary reader/writer
/// - Constant-time byte comparison and bounded random identifiers
/// - LZW payload compression

pub mod hash;
pub mod util;
pub mod ec;
pub mod compression;

mod error;
pub use error::PrimitivesError;
