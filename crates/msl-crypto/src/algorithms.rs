//! Algorithm identifiers carried in envelopes and selected by contexts.

use std::fmt;
use std::str::FromStr;

use msl_primitives::hash::sha256;

/// Transform used by ECC contexts in encrypt/decrypt mode.
pub const ECIES_TRANSFORM: &str = "ECIES";

/// Algorithm used by ECC contexts in sign/verify mode.
pub const SHA256_ECDSA: &str = "SHA256withECDSA";

/// Cipher specifications a version 2 ciphertext envelope may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSpec {
    AesCbcPkcs5Padding,
    AesWrap,
    RsaEcbPkcs1Padding,
    RsaEcbOaepPadding,
    Ecies,
}

impl CipherSpec {
    pub fn as_str(&self) -> &'static str {
        match self {
            CipherSpec::AesCbcPkcs5Padding => "AES/CBC/PKCS5Padding",
            CipherSpec::AesWrap => "AESWrap",
            CipherSpec::RsaEcbPkcs1Padding => "RSA/ECB/PKCS1Padding",
            CipherSpec::RsaEcbOaepPadding => "RSA/ECB/OAEPPadding",
            CipherSpec::Ecies => ECIES_TRANSFORM,
        }
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            CipherSpec::AesCbcPkcs5Padding,
            CipherSpec::AesWrap,
            CipherSpec::RsaEcbPkcs1Padding,
            CipherSpec::RsaEcbOaepPadding,
            CipherSpec::Ecies,
        ]
        .into_iter()
        .find(|c| c.as_str() == s)
        .ok_or_else(|| format!("unknown cipher specification {}", s))
    }
}

/// Signature algorithms a version 2 signature envelope may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgo {
    Sha256WithRsa,
    Sha256WithEcdsa,
    HmacSha256,
    AesCmac,
}

impl SignatureAlgo {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgo::Sha256WithRsa => "SHA256withRSA",
            SignatureAlgo::Sha256WithEcdsa => SHA256_ECDSA,
            SignatureAlgo::HmacSha256 => "HmacSHA256",
            SignatureAlgo::AesCmac => "AESCmac",
        }
    }

    /// Digest of `data` for hash-then-sign algorithms; `None` for MACs.
    pub fn digest(&self, data: &[u8]) -> Option<[u8; 32]> {
        match self {
            SignatureAlgo::Sha256WithRsa | SignatureAlgo::Sha256WithEcdsa => Some(sha256(data)),
            SignatureAlgo::HmacSha256 | SignatureAlgo::AesCmac => None,
        }
    }
}

impl fmt::Display for SignatureAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureAlgo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            SignatureAlgo::Sha256WithRsa,
            SignatureAlgo::Sha256WithEcdsa,
            SignatureAlgo::HmacSha256,
            SignatureAlgo::AesCmac,
        ]
        .into_iter()
        .find(|a| a.as_str() == s)
        .ok_or_else(|| format!("unknown signature algorithm {}", s))
    }
}
