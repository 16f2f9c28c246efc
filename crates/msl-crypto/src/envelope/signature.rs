//! Signature envelope.
//!
//! Version 1 is the raw signature with no framing. Version 2 is an encoded
//! object `{version: 2, algorithm, signature}`.

use msl_io::{MslEncoderFactory, MslEncoderFormat};
use tracing::debug;

use super::Version;
use crate::algorithms::SignatureAlgo;
use crate::MslCryptoError;

const KEY_VERSION: &str = "version";
const KEY_ALGORITHM: &str = "algorithm";
const KEY_SIGNATURE: &str = "signature";

/// A signature and, for version 2, the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MslSignatureEnvelope {
    version: Version,
    algorithm: Option<SignatureAlgo>,
    signature: Vec<u8>,
}

impl MslSignatureEnvelope {
    pub fn new_v1(signature: Vec<u8>) -> Self {
        MslSignatureEnvelope {
            version: Version::V1,
            algorithm: None,
            signature,
        }
    }

    pub fn new_v2(algorithm: SignatureAlgo, signature: Vec<u8>) -> Self {
        MslSignatureEnvelope {
            version: Version::V2,
            algorithm: Some(algorithm),
            signature,
        }
    }

    /// Parse envelope bytes, inferring the version.
    ///
    /// Bytes that decode to an object with `version == 2` are a version 2
    /// envelope and must carry every field. Anything else, including bytes
    /// the encoder cannot parse, is taken as a raw version 1 signature.
    pub fn parse(
        envelope: &[u8],
        encoder: &dyn MslEncoderFactory,
    ) -> Result<Self, MslCryptoError> {
        let obj = match encoder.parse_object(envelope) {
            Ok(obj) => obj,
            Err(e) => {
                debug!(reason = %e, "signature envelope is not an encoded object, using version 1");
                return Ok(Self::new_v1(envelope.to_vec()));
            }
        };

        match obj.opt_int(KEY_VERSION) {
            Ok(Some(v)) if v == Version::V2.value() => {}
            _ => {
                debug!("signature envelope does not declare version 2, using version 1");
                return Ok(Self::new_v1(envelope.to_vec()));
            }
        }

        let algorithm = obj
            .get_string(KEY_ALGORITHM)?
            .parse::<SignatureAlgo>()
            .map_err(MslCryptoError::Envelope)?;
        let signature = obj.get_bytes(KEY_SIGNATURE)?;
        Ok(Self::new_v2(algorithm, signature))
    }

    /// Parse envelope bytes as an explicit version.
    pub fn parse_version(
        envelope: &[u8],
        version: Version,
        encoder: &dyn MslEncoderFactory,
    ) -> Result<Self, MslCryptoError> {
        match version {
            Version::V1 => Ok(Self::new_v1(envelope.to_vec())),
            Version::V2 => {
                let obj = encoder.parse_object(envelope)?;
                let declared = Version::from_value(obj.get_int(KEY_VERSION)?)?;
                if declared != Version::V2 {
                    return Err(MslCryptoError::Envelope(format!(
                        "signature envelope declares version {} but version 2 was expected",
                        declared.value()
                    )));
                }
                let algorithm = obj
                    .get_string(KEY_ALGORITHM)?
                    .parse::<SignatureAlgo>()
                    .map_err(MslCryptoError::Envelope)?;
                Ok(Self::new_v2(algorithm, obj.get_bytes(KEY_SIGNATURE)?))
            }
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn algorithm(&self) -> Option<SignatureAlgo> {
        self.algorithm
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Wire bytes. Version 1 ignores `format`.
    pub fn get_bytes(
        &self,
        encoder: &dyn MslEncoderFactory,
        format: &MslEncoderFormat,
    ) -> Result<Vec<u8>, MslCryptoError> {
        match self.version {
            Version::V1 => Ok(self.signature.clone()),
            Version::V2 => {
                let mut obj = encoder.create_object();
                obj.put(KEY_VERSION, Version::V2.value());
                if let Some(algorithm) = self.algorithm {
                    obj.put(KEY_ALGORITHM, algorithm.as_str());
                }
                obj.put(KEY_SIGNATURE, self.signature.clone());
                Ok(encoder.encode_object(&obj, format)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msl_io::{DefaultMslEncoderFactory, MslObject};

    #[test]
    fn test_v1_is_raw() {
        let encoder = DefaultMslEncoderFactory::new();
        let env = MslSignatureEnvelope::new_v1(vec![0x30, 0x44, 0x02]);
        let bytes = env.get_bytes(&encoder, &MslEncoderFormat::JSON).unwrap();
        assert_eq!(bytes, vec![0x30, 0x44, 0x02]);
        let parsed = MslSignatureEnvelope::parse(&bytes, &encoder).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn test_v2_round_trip() {
        let encoder = DefaultMslEncoderFactory::new();
        let env = MslSignatureEnvelope::new_v2(SignatureAlgo::Sha256WithEcdsa, vec![1, 2, 3]);
        for format in [MslEncoderFormat::JSON, MslEncoderFormat::BINARY] {
            let bytes = env.get_bytes(&encoder, &format).unwrap();
            let parsed = MslSignatureEnvelope::parse(&bytes, &encoder).unwrap();
            assert_eq!(parsed.version(), Version::V2);
            assert_eq!(parsed.algorithm(), Some(SignatureAlgo::Sha256WithEcdsa));
            assert_eq!(parsed.signature(), &[1, 2, 3]);
        }
    }

    #[test]
    fn test_object_without_version_is_v1() {
        let encoder = DefaultMslEncoderFactory::new();
        let mut obj = MslObject::new();
        obj.put("signature", vec![1u8]);
        let bytes = encoder.encode_object(&obj, &MslEncoderFormat::JSON).unwrap();
        let parsed = MslSignatureEnvelope::parse(&bytes, &encoder).unwrap();
        assert_eq!(parsed.version(), Version::V1);
        assert_eq!(parsed.signature(), &bytes[..]);
    }

    #[test]
    fn test_v2_missing_signature_is_error() {
        let encoder = DefaultMslEncoderFactory::new();
        let mut obj = MslObject::new();
        obj.put("version", 2i64).put("algorithm", "SHA256withECDSA");
        let bytes = encoder.encode_object(&obj, &MslEncoderFormat::BINARY).unwrap();
        let err = MslSignatureEnvelope::parse(&bytes, &encoder).unwrap_err();
        assert!(err.is_encoding_error());
    }

    #[test]
    fn test_v2_unknown_algorithm_is_error() {
        let encoder = DefaultMslEncoderFactory::new();
        let mut obj = MslObject::new();
        obj.put("version", 2i64)
            .put("algorithm", "MD5withRSA")
            .put("signature", vec![1u8]);
        let bytes = encoder.encode_object(&obj, &MslEncoderFormat::JSON).unwrap();
        let err = MslSignatureEnvelope::parse(&bytes, &encoder).unwrap_err();
        assert!(matches!(err, MslCryptoError::Envelope(_)));
    }

    #[test]
    fn test_parse_explicit_version() {
        let encoder = DefaultMslEncoderFactory::new();
        let env = MslSignatureEnvelope::new_v2(SignatureAlgo::HmacSha256, vec![9; 32]);
        let bytes = env.get_bytes(&encoder, &MslEncoderFormat::JSON).unwrap();

        let v1 = MslSignatureEnvelope::parse_version(&bytes, Version::V1, &encoder).unwrap();
        assert_eq!(v1.signature(), &bytes[..]);

        let v2 = MslSignatureEnvelope::parse_version(&bytes, Version::V2, &encoder).unwrap();
        assert_eq!(v2, env);

        let err = MslSignatureEnvelope::parse_version(&[0x30, 0x01], Version::V2, &encoder)
            .unwrap_err();
        assert!(err.is_encoding_error());
    }
}
