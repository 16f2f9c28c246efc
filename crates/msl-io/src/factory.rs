//! Encoder factories.

use tracing::trace;

use crate::{binary, json, MslEncoderError, MslEncoderFormat, MslObject};

/// Default limit on object/array nesting when parsing untrusted input.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Produces encoders and decoders for a set of wire formats.
///
/// Crypto contexts receive a factory from their caller and never assume a
/// particular format exists; they only need to encode an object in the
/// format the caller asked for, and to parse whatever the peer sent.
pub trait MslEncoderFactory: Send + Sync {
    /// Formats this factory can encode and parse.
    fn supported_formats(&self) -> Vec<MslEncoderFormat>;

    /// Choose a format from those a peer advertises.
    ///
    /// With no overlap this falls back to JSON if this factory supports it,
    /// otherwise to the first format it supports.
    fn preferred_format(&self, formats: &[MslEncoderFormat]) -> MslEncoderFormat {
        let supported = self.supported_formats();
        if let Some(shared) = supported.iter().find(|f| formats.contains(f)) {
            return shared.clone();
        }
        if supported.contains(&MslEncoderFormat::JSON) {
            return MslEncoderFormat::JSON;
        }
        supported
            .into_iter()
            .next()
            .unwrap_or(MslEncoderFormat::JSON)
    }

    /// Create an empty object.
    fn create_object(&self) -> MslObject {
        MslObject::new()
    }

    /// Parse an encoded object, detecting its format from the data itself.
    fn parse_object(&self, data: &[u8]) -> Result<MslObject, MslEncoderError>;

    /// Encode an object in the requested format.
    fn encode_object(
        &self,
        obj: &MslObject,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslEncoderError>;
}

/// Factory for the built-in JSON and MSL binary formats.
#[derive(Debug, Clone)]
pub struct DefaultMslEncoderFactory {
    max_depth: usize,
}

impl DefaultMslEncoderFactory {
    pub fn new() -> Self {
        DefaultMslEncoderFactory {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use a different nesting limit for parsing.
    pub fn with_max_depth(max_depth: usize) -> Self {
        DefaultMslEncoderFactory { max_depth }
    }

    /// Identify the format of an encoding from its first significant byte.
    ///
    /// Leading JSON whitespace is skipped.
    pub fn detect_format(data: &[u8]) -> Result<MslEncoderFormat, MslEncoderError> {
        let first = data
            .iter()
            .copied()
            .find(|b| !matches!(*b, b' ' | b'\t' | b'\r' | b'\n'))
            .ok_or(MslEncoderError::Empty)?;
        MslEncoderFormat::from_identifier(first).ok_or(MslEncoderError::UnknownIdentifier(first))
    }
}

impl Default for DefaultMslEncoderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MslEncoderFactory for DefaultMslEncoderFactory {
    fn supported_formats(&self) -> Vec<MslEncoderFormat> {
        // Preference order.
        vec![MslEncoderFormat::BINARY, MslEncoderFormat::JSON]
    }

    fn parse_object(&self, data: &[u8]) -> Result<MslObject, MslEncoderError> {
        let format = Self::detect_format(data)?;
        trace!(format = %format, len = data.len(), "parsing MSL object");
        if format == MslEncoderFormat::BINARY {
            binary::decode(data, self.max_depth)
        } else {
            json::decode(data, self.max_depth)
        }
    }

    fn encode_object(
        &self,
        obj: &MslObject,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslEncoderError> {
        let encoded = if *format == MslEncoderFormat::BINARY {
            binary::encode(obj)
        } else if *format == MslEncoderFormat::JSON {
            json::encode(obj)?
        } else {
            return Err(MslEncoderError::UnsupportedFormat(format.to_string()));
        };
        trace!(format = %format, len = encoded.len(), "encoded MSL object");
        Ok(encoded)
    }
}
