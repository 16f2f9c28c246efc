//! Wire format identifiers.

use std::borrow::Cow;
use std::fmt;

/// A wire format an [`MslObject`](crate::MslObject) can be encoded in.
///
/// Formats are an open set: callers may define their own and hand them to
/// a factory that understands them. The identifier is the first byte of
/// every encoding in that format and is what `parse_object` sniffs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MslEncoderFormat {
    name: Cow<'static, str>,
    identifier: u8,
}

impl MslEncoderFormat {
    /// JSON text. Identified by its opening brace.
    pub const JSON: MslEncoderFormat = MslEncoderFormat {
        name: Cow::Borrowed("JSON"),
        identifier: b'{',
    };

    /// Compact MSL binary encoding.
    pub const BINARY: MslEncoderFormat = MslEncoderFormat {
        name: Cow::Borrowed("MSLB"),
        identifier: 0xB5,
    };

    /// Define a format outside the built-in set.
    pub fn new(name: impl Into<String>, identifier: u8) -> Self {
        MslEncoderFormat {
            name: Cow::Owned(name.into()),
            identifier,
        }
    }

    /// Look up a built-in format by name.
    pub fn get_format(name: &str) -> Option<MslEncoderFormat> {
        [Self::JSON, Self::BINARY].into_iter().find(|f| f.name == name)
    }

    /// Look up a built-in format by its leading identifier byte.
    pub fn from_identifier(identifier: u8) -> Option<MslEncoderFormat> {
        [Self::JSON, Self::BINARY]
            .into_iter()
            .find(|f| f.identifier == identifier)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> u8 {
        self.identifier
    }
}

impl fmt::Display for MslEncoderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
