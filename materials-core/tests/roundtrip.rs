use std::sync::Arc;

use materials_core::{
    Cmm, DecryptionRequest, DefaultCmm, Edk, EncryptionContext, EncryptionRequest, Error,
    MultiKeyring, RawAesKeyring,
};

fn ctx_with(pairs: &[(&str, &str)]) -> EncryptionContext {
    let mut ctx = EncryptionContext::new();
    for (k, v) in pairs {
        ctx.insert(*k, *v);
    }
    ctx
}

#[test]
fn single_keyring_round_trip_through_cmm() {
    let keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x42u8; 32]).unwrap());
    let cmm = DefaultCmm::new(keyring);
    let ctx = ctx_with(&[("purpose", "test"), ("team", "crypto")]);

    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();
    assert_eq!(enc_mat.edks.len(), 1);

    let dec_mat = cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap();
    assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
    assert_eq!(dec_mat.suite.suite_id, enc_mat.suite.suite_id);
}

#[test]
fn multi_keyring_round_trip_with_two_children() {
    let generator = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "gen-key", &[0x10u8; 32]).unwrap());
    let child = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "child-key", &[0x20u8; 32]).unwrap());
    let multi = Arc::new(MultiKeyring::with_generator(generator).add_child(child));
    let cmm = DefaultCmm::new(multi);

    let ctx = ctx_with(&[("env", "prod")]);
    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();
    assert_eq!(enc_mat.edks.len(), 2);

    let dec_mat = cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap();
    assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
}

#[test]
fn decrypting_with_wrong_keyring_reports_cannot_decrypt() {
    let encrypting_keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x42u8; 32]).unwrap());
    let decrypting_keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x43u8; 32]).unwrap());

    let enc_cmm = DefaultCmm::new(encrypting_keyring);
    let dec_cmm = DefaultCmm::new(decrypting_keyring);

    let ctx = EncryptionContext::new();
    let enc_mat = enc_cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();

    let err = dec_cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap_err();
    assert!(matches!(err, Error::CannotDecrypt(_)));
}

#[test]
fn tampered_encryption_context_fails_decryption() {
    let keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x77u8; 32]).unwrap());
    let cmm = DefaultCmm::new(keyring);

    let ctx = ctx_with(&[("purpose", "test")]);
    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();

    let mut tampered = enc_mat.encryption_context.clone();
    tampered.insert("purpose", "tampered");

    let err = cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &tampered))
        .unwrap_err();
    assert!(matches!(err, Error::CannotDecrypt(_) | Error::BadCiphertext));
}

#[test]
fn decrypting_with_no_edks_at_all_reports_cannot_decrypt() {
    let keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x88u8; 32]).unwrap());
    let cmm = DefaultCmm::new(keyring);
    let ctx = EncryptionContext::new();

    let empty_edks: Vec<Edk> = Vec::new();
    let err = cmm
        .decrypt_materials(&DecryptionRequest::new(materials_core::DEFAULT_SUITE_ID, &empty_edks, &ctx))
        .unwrap_err();
    assert!(matches!(err, Error::CannotDecrypt(_)));
}

#[test]
fn unknown_suite_id_is_rejected_before_touching_any_keyring() {
    let keyring = Arc::new(RawAesKeyring::new("raw-vsn-1.0", "my-key", &[0x99u8; 32]).unwrap());
    let cmm = DefaultCmm::new(keyring);
    let ctx = EncryptionContext::new();
    let edks: Vec<Edk> = Vec::new();

    let err = cmm.decrypt_materials(&DecryptionRequest::new(0xFFFF, &edks, &ctx)).unwrap_err();
    assert_eq!(err, Error::UnsupportedFormat);
}
