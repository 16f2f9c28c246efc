#![deny(missing_docs)]

//! MSL crypto SDK.
//!
//! Re-exports the MSL crypto components for convenient single-crate usage.

pub use msl_crypto as crypto;
pub use msl_io as io;
pub use msl_primitives as primitives;
