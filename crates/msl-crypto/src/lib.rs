//! MSL crypto contexts.
//!
//! A crypto context binds key material to a fixed algorithm choice and
//! exposes encrypt/decrypt, wrap/unwrap and sign/verify through the
//! [`CryptoContext`] trait. Ciphertexts and signatures leave a context
//! wrapped in envelopes, encoded with a caller-supplied
//! [`MslEncoderFactory`](msl_io::MslEncoderFactory).

mod error;
pub mod algorithms;
pub mod keys;
pub mod context;
pub mod envelope;
pub mod ecc;
pub mod null;

pub use context::CryptoContext;
pub use ecc::{EccCryptoContext, Mode};
pub use error::MslCryptoError;
pub use keys::KeyPair;
pub use null::NullCryptoContext;
