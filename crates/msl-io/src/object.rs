//! In-memory MSL values.

use base64::Engine;
use std::collections::BTreeMap;

use crate::MslEncoderError;

/// A single value inside an [`MslObject`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MslValue {
    Bytes(Vec<u8>),
    String(String),
    Int(i64),
    Bool(bool),
    Object(MslObject),
    Array(Vec<MslValue>),
}

impl MslValue {
    /// Human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MslValue::Bytes(_) => "bytes",
            MslValue::String(_) => "a string",
            MslValue::Int(_) => "an integer",
            MslValue::Bool(_) => "a boolean",
            MslValue::Object(_) => "an object",
            MslValue::Array(_) => "an array",
        }
    }
}

impl From<Vec<u8>> for MslValue {
    fn from(v: Vec<u8>) -> Self {
        MslValue::Bytes(v)
    }
}

impl From<&[u8]> for MslValue {
    fn from(v: &[u8]) -> Self {
        MslValue::Bytes(v.to_vec())
    }
}

impl From<String> for MslValue {
    fn from(v: String) -> Self {
        MslValue::String(v)
    }
}

impl From<&str> for MslValue {
    fn from(v: &str) -> Self {
        MslValue::String(v.to_string())
    }
}

impl From<i64> for MslValue {
    fn from(v: i64) -> Self {
        MslValue::Int(v)
    }
}

impl From<bool> for MslValue {
    fn from(v: bool) -> Self {
        MslValue::Bool(v)
    }
}

impl From<MslObject> for MslValue {
    fn from(v: MslObject) -> Self {
        MslValue::Object(v)
    }
}

impl From<Vec<MslValue>> for MslValue {
    fn from(v: Vec<MslValue>) -> Self {
        MslValue::Array(v)
    }
}

/// A key/value map that every wire format can represent.
///
/// Keys are kept sorted so encodings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MslObject {
    entries: BTreeMap<String, MslValue>,
}

impl MslObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning `self` for chaining.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<MslValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<MslValue> {
        self.entries.remove(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&MslValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MslValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn require(&self, key: &str) -> Result<&MslValue, MslEncoderError> {
        self.entries
            .get(key)
            .ok_or_else(|| MslEncoderError::MissingKey(key.to_string()))
    }

    /// Fetch a byte value.
    ///
    /// Text formats carry bytes as base64 strings, so a string value is
    /// decoded here rather than rejected.
    pub fn get_bytes(&self, key: &str) -> Result<Vec<u8>, MslEncoderError> {
        match self.require(key)? {
            MslValue::Bytes(b) => Ok(b.clone()),
            MslValue::String(s) => base64::engine::general_purpose::STANDARD
                .decode(s)
                .map_err(|e| MslEncoderError::Base64 {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            _ => Err(wrong_type(key, "bytes")),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String, MslEncoderError> {
        match self.require(key)? {
            MslValue::String(s) => Ok(s.clone()),
            _ => Err(wrong_type(key, "a string")),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64, MslEncoderError> {
        match self.require(key)? {
            MslValue::Int(i) => Ok(*i),
            _ => Err(wrong_type(key, "an integer")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, MslEncoderError> {
        match self.require(key)? {
            MslValue::Bool(b) => Ok(*b),
            _ => Err(wrong_type(key, "a boolean")),
        }
    }

    pub fn get_object(&self, key: &str) -> Result<&MslObject, MslEncoderError> {
        match self.require(key)? {
            MslValue::Object(o) => Ok(o),
            _ => Err(wrong_type(key, "an object")),
        }
    }

    pub fn get_array(&self, key: &str) -> Result<&[MslValue], MslEncoderError> {
        match self.require(key)? {
            MslValue::Array(a) => Ok(a),
            _ => Err(wrong_type(key, "an array")),
        }
    }

    /// Like [`get_bytes`](Self::get_bytes) but absent keys are `Ok(None)`.
    /// A present value of the wrong type is still an error.
    pub fn opt_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, MslEncoderError> {
        if self.has(key) {
            self.get_bytes(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn opt_string(&self, key: &str) -> Result<Option<String>, MslEncoderError> {
        if self.has(key) {
            self.get_string(key).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn opt_int(&self, key: &str) -> Result<Option<i64>, MslEncoderError> {
        if self.has(key) {
            self.get_int(key).map(Some)
        } else {
            Ok(None)
        }
    }
}

fn wrong_type(key: &str, expected: &'static str) -> MslEncoderError {
    MslEncoderError::WrongType {
        key: key.to_string(),
        expected,
    }
}

impl FromIterator<(String, MslValue)> for MslObject {
    fn from_iter<I: IntoIterator<Item = (String, MslValue)>>(iter: I) -> Self {
        MslObject {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MslObject {
        let mut obj = MslObject::new();
        obj.put("keyid", "k1")
            .put("ciphertext", vec![1u8, 2, 3])
            .put("version", 2i64)
            .put("flag", true);
        obj
    }

    #[test]
    fn test_typed_getters() {
        let obj = sample();
        assert_eq!(obj.get_string("keyid").unwrap(), "k1");
        assert_eq!(obj.get_bytes("ciphertext").unwrap(), vec![1, 2, 3]);
        assert_eq!(obj.get_int("version").unwrap(), 2);
        assert!(obj.get_bool("flag").unwrap());
        assert_eq!(obj.len(), 4);
    }

    #[test]
    fn test_missing_and_wrong_type() {
        let obj = sample();
        assert!(matches!(obj.get_bytes("iv"), Err(MslEncoderError::MissingKey(k)) if k == "iv"));
        assert!(matches!(
            obj.get_int("keyid"),
            Err(MslEncoderError::WrongType { expected: "an integer", .. })
        ));
        assert!(obj.get_bytes("version").is_err());
    }

    #[test]
    fn test_bytes_from_base64_string() {
        let mut obj = MslObject::new();
        obj.put("b", "AQID");
        assert_eq!(obj.get_bytes("b").unwrap(), vec![1, 2, 3]);

        obj.put("bad", "not base64!");
        assert!(matches!(obj.get_bytes("bad"), Err(MslEncoderError::Base64 { .. })));
    }

    #[test]
    fn test_optional_getters() {
        let obj = sample();
        assert_eq!(obj.opt_bytes("iv").unwrap(), None);
        assert_eq!(obj.opt_bytes("ciphertext").unwrap(), Some(vec![1, 2, 3]));
        assert!(obj.opt_string("version").is_err());
        assert_eq!(obj.opt_int("version").unwrap(), Some(2));
    }

    #[test]
    fn test_keys_are_sorted() {
        let obj = sample();
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, vec!["ciphertext", "flag", "keyid", "version"]);
    }
}
