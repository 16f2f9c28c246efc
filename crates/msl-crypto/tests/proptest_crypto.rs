use proptest::prelude::*;

use msl_crypto::{CryptoContext, EccCryptoContext, KeyPair, Mode};
use msl_io::{DefaultMslEncoderFactory, MslEncoderFormat};
use msl_primitives::ec::private_key::PrivateKey;

fn format_strategy() -> impl Strategy<Value = MslEncoderFormat> {
    prop_oneof![Just(MslEncoderFormat::JSON), Just(MslEncoderFormat::BINARY)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn encrypt_decrypt_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..512),
        format in format_strategy(),
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let encoder = DefaultMslEncoderFactory::new();
            let ctx = EccCryptoContext::from_key_pair(
                "prop",
                &KeyPair::from_private_key(key),
                Mode::EncryptDecrypt,
            );
            let envelope = ctx.encrypt(&data, &encoder, &format).unwrap();
            prop_assert_eq!(ctx.decrypt(&envelope, &encoder).unwrap(), data);
        }
    }

    #[test]
    fn sign_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        data in prop::collection::vec(any::<u8>(), 0..512),
        format in format_strategy(),
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let encoder = DefaultMslEncoderFactory::new();
            let ctx = EccCryptoContext::from_key_pair(
                "prop",
                &KeyPair::from_private_key(key),
                Mode::SignVerify,
            );
            let sig = ctx.sign(&data, &encoder, &format).unwrap();
            prop_assert!(ctx.verify(&data, &sig, &encoder).unwrap());

            let mut other = data.clone();
            other.push(0x01);
            prop_assert!(!ctx.verify(&other, &sig, &encoder).unwrap());
        }
    }

    #[test]
    fn random_signature_never_verifies(sig in prop::collection::vec(any::<u8>(), 0..96)) {
        let encoder = DefaultMslEncoderFactory::new();
        let ctx = EccCryptoContext::from_key_pair(
            "prop",
            &KeyPair::from_private_key(PrivateKey::new()),
            Mode::SignVerify,
        );
        if let Ok(valid) = ctx.verify(b"data", &sig, &encoder) {
            prop_assert!(!valid);
        }
    }

    #[test]
    fn decrypt_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let encoder = DefaultMslEncoderFactory::new();
        let ctx = EccCryptoContext::from_key_pair(
            "prop",
            &KeyPair::from_private_key(PrivateKey::new()),
            Mode::EncryptDecrypt,
        );
        let _ = ctx.decrypt(&data, &encoder);
    }
}
