//! Ciphertext envelope.
//!
//! Version 1 layout: `{keyid, iv?, ciphertext, sha256}` where `sha256` is a
//! fixed legacy value that is written and never checked.
//! Version 2 layout: `{version: 2, cipherspec, iv?, ciphertext}`.

use msl_io::{MslEncoderFactory, MslEncoderFormat, MslObject};

use super::Version;
use crate::algorithms::CipherSpec;
use crate::MslCryptoError;

const KEY_KEY_ID: &str = "keyid";
const KEY_IV: &str = "iv";
const KEY_CIPHERTEXT: &str = "ciphertext";
const KEY_SHA256: &str = "sha256";
const KEY_VERSION: &str = "version";
const KEY_CIPHERSPEC: &str = "cipherspec";

/// Legacy integrity placeholder carried by version 1 envelopes.
const LEGACY_SHA256: [u8; 1] = [0x00];

/// A framed ciphertext with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MslCiphertextEnvelope {
    version: Version,
    key_id: Option<String>,
    cipher_spec: Option<CipherSpec>,
    iv: Option<Vec<u8>>,
    ciphertext: Vec<u8>,
}

impl MslCiphertextEnvelope {
    /// Version 1 envelope identified by the producing key.
    pub fn new_v1(key_id: impl Into<String>, iv: Option<Vec<u8>>, ciphertext: Vec<u8>) -> Self {
        MslCiphertextEnvelope {
            version: Version::V1,
            key_id: Some(key_id.into()),
            cipher_spec: None,
            iv,
            ciphertext,
        }
    }

    /// Version 2 envelope identified by its cipher specification.
    pub fn new_v2(cipher_spec: CipherSpec, iv: Option<Vec<u8>>, ciphertext: Vec<u8>) -> Self {
        MslCiphertextEnvelope {
            version: Version::V2,
            key_id: None,
            cipher_spec: Some(cipher_spec),
            iv,
            ciphertext,
        }
    }

    /// Build an envelope from a decoded object.
    ///
    /// With `version` unset the layout is inferred: an object carrying a
    /// `version` field is version 2, anything else is version 1.
    pub fn parse(obj: &MslObject, version: Option<Version>) -> Result<Self, MslCryptoError> {
        let version = match version {
            Some(v) => v,
            None if obj.has(KEY_VERSION) => Version::from_value(obj.get_int(KEY_VERSION)?)?,
            None => Version::V1,
        };

        match version {
            Version::V1 => Ok(MslCiphertextEnvelope {
                version,
                key_id: Some(obj.get_string(KEY_KEY_ID)?),
                cipher_spec: None,
                iv: obj.opt_bytes(KEY_IV)?,
                ciphertext: obj.get_bytes(KEY_CIPHERTEXT)?,
            }),
            Version::V2 => {
                let declared = Version::from_value(obj.get_int(KEY_VERSION)?)?;
                if declared != Version::V2 {
                    return Err(MslCryptoError::Envelope(format!(
                        "ciphertext envelope declares version {} but version 2 was expected",
                        declared.value()
                    )));
                }
                let cipher_spec = obj
                    .get_string(KEY_CIPHERSPEC)?
                    .parse::<CipherSpec>()
                    .map_err(MslCryptoError::Envelope)?;
                Ok(MslCiphertextEnvelope {
                    version,
                    key_id: None,
                    cipher_spec: Some(cipher_spec),
                    iv: obj.opt_bytes(KEY_IV)?,
                    ciphertext: obj.get_bytes(KEY_CIPHERTEXT)?,
                })
            }
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Producing key identity (version 1 only).
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// Cipher specification (version 2 only).
    pub fn cipher_spec(&self) -> Option<CipherSpec> {
        self.cipher_spec
    }

    pub fn iv(&self) -> Option<&[u8]> {
        self.iv.as_deref()
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Consume the envelope, keeping only the ciphertext.
    pub fn into_ciphertext(self) -> Vec<u8> {
        self.ciphertext
    }

    /// Object form of this envelope.
    pub fn to_msl_object(&self, encoder: &dyn MslEncoderFactory) -> MslObject {
        let mut obj = encoder.create_object();
        match self.version {
            Version::V1 => {
                obj.put(KEY_KEY_ID, self.key_id.clone().unwrap_or_default());
                obj.put(KEY_SHA256, LEGACY_SHA256.to_vec());
            }
            Version::V2 => {
                obj.put(KEY_VERSION, Version::V2.value());
                if let Some(spec) = self.cipher_spec {
                    obj.put(KEY_CIPHERSPEC, spec.as_str());
                }
            }
        }
        if let Some(iv) = &self.iv {
            obj.put(KEY_IV, iv.clone());
        }
        obj.put(KEY_CIPHERTEXT, self.ciphertext.clone());
        obj
    }

    /// Encode this envelope in `format`.
    pub fn to_msl_encoding(
        &self,
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        Ok(encoder.encode_object(&self.to_msl_object(encoder), format)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msl_io::{DefaultMslEncoderFactory, MslEncoderError};

    #[test]
    fn test_v1_round_trip() {
        let encoder = DefaultMslEncoderFactory::new();
        let env = MslCiphertextEnvelope::new_v1("k1", None, vec![1, 2, 3]);
        for format in [MslEncoderFormat::JSON, MslEncoderFormat::BINARY] {
            let bytes = env.to_msl_encoding(&encoder, &format).unwrap();
            let obj = encoder.parse_object(&bytes).unwrap();
            let parsed = MslCiphertextEnvelope::parse(&obj, None).unwrap();
            assert_eq!(parsed, env);
            assert_eq!(parsed.key_id(), Some("k1"));
            assert_eq!(parsed.iv(), None);
        }
    }

    #[test]
    fn test_v1_writes_legacy_sha256() {
        let encoder = DefaultMslEncoderFactory::new();
        let obj = MslCiphertextEnvelope::new_v1("k1", None, vec![9]).to_msl_object(&encoder);
        assert_eq!(obj.get_bytes("sha256").unwrap(), vec![0x00]);
        assert!(!obj.has("version"));
    }

    #[test]
    fn test_v1_ignores_sha256_on_read() {
        let mut obj = MslObject::new();
        obj.put("keyid", "k1").put("ciphertext", vec![5u8]);
        let env = MslCiphertextEnvelope::parse(&obj, Some(Version::V1)).unwrap();
        assert_eq!(env.ciphertext(), &[5]);
    }

    #[test]
    fn test_v2_round_trip() {
        let encoder = DefaultMslEncoderFactory::new();
        let env = MslCiphertextEnvelope::new_v2(CipherSpec::Ecies, Some(vec![7; 12]), vec![4, 5]);
        let bytes = env.to_msl_encoding(&encoder, &MslEncoderFormat::JSON).unwrap();
        let obj = encoder.parse_object(&bytes).unwrap();
        let parsed = MslCiphertextEnvelope::parse(&obj, None).unwrap();
        assert_eq!(parsed.version(), Version::V2);
        assert_eq!(parsed.cipher_spec(), Some(CipherSpec::Ecies));
        assert_eq!(parsed.iv(), Some(&[7u8; 12][..]));
        assert_eq!(parsed.into_ciphertext(), vec![4, 5]);
    }

    #[test]
    fn test_v2_unknown_cipher_spec() {
        let mut obj = MslObject::new();
        obj.put("version", 2i64)
            .put("cipherspec", "ROT13")
            .put("ciphertext", vec![1u8]);
        let err = MslCiphertextEnvelope::parse(&obj, None).unwrap_err();
        assert!(matches!(err, MslCryptoError::Envelope(_)));
    }

    #[test]
    fn test_unknown_version() {
        let mut obj = MslObject::new();
        obj.put("version", 9i64).put("ciphertext", vec![1u8]);
        let err = MslCiphertextEnvelope::parse(&obj, None).unwrap_err();
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_v1_missing_fields() {
        let mut obj = MslObject::new();
        obj.put("keyid", "k1");
        let err = MslCiphertextEnvelope::parse(&obj, Some(Version::V1)).unwrap_err();
        assert!(matches!(
            err,
            MslCryptoError::Encoding(MslEncoderError::MissingKey(ref k)) if k == "ciphertext"
        ));

        let mut obj = MslObject::new();
        obj.put("keyid", 42i64).put("ciphertext", vec![1u8]);
        let err = MslCiphertextEnvelope::parse(&obj, Some(Version::V1)).unwrap_err();
        assert!(matches!(err, MslCryptoError::Encoding(MslEncoderError::WrongType { .. })));
    }

    #[test]
    fn test_forced_v2_on_v1_object() {
        let mut obj = MslObject::new();
        obj.put("keyid", "k1").put("ciphertext", vec![1u8]);
        let err = MslCiphertextEnvelope::parse(&obj, Some(Version::V2)).unwrap_err();
        assert!(err.is_encoding_error());
    }
}
