//! MSL encoding subsystem.
//!
//! Converts in-memory [`MslObject`]s to and from a negotiated wire format.
//! The crypto contexts only talk to the [`MslEncoderFactory`] trait, so the
//! set of formats stays open; [`DefaultMslEncoderFactory`] ships JSON and the
//! compact MSL binary encoding.

mod error;
pub mod format;
pub mod object;
pub mod json;
pub mod binary;
pub mod factory;

pub use error::MslEncoderError;
pub use factory::{DefaultMslEncoderFactory, MslEncoderFactory};
pub use format::MslEncoderFormat;
pub use object::{MslObject, MslValue};
