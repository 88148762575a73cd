use std::sync::Arc;

use kms_keyring::{KmsKeyring, MockKmsClient, SingleClientSupplier};
use materials_core::{Cmm, DecryptionRequest, DefaultCmm, EncryptionContext, EncryptionRequest, Error, MultiKeyring};

fn shared_supplier() -> Arc<dyn kms_keyring::ClientSupplier> {
    Arc::new(SingleClientSupplier::new(Arc::new(MockKmsClient::new())))
}

#[test]
fn encrypt_with_two_cmks_produces_two_edks_either_can_decrypt() {
    let supplier = shared_supplier();
    let generator = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/a", supplier.clone()).unwrap());
    let child = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/b", supplier).unwrap());
    let multi = Arc::new(MultiKeyring::with_generator(generator).add_child(child));
    let cmm = DefaultCmm::new(multi);

    let ctx = EncryptionContext::new();
    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();
    assert_eq!(enc_mat.edks.len(), 2);

    let dec_mat = cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap();
    assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
}

#[test]
fn decrypt_falls_through_a_cmk_the_caller_has_no_access_to() {
    // Two independent backends: the caller only has a client for CMK "b".
    let client_a = Arc::new(MockKmsClient::new());
    let client_b = Arc::new(MockKmsClient::new());

    let encrypt_supplier_a: Arc<dyn kms_keyring::ClientSupplier> = Arc::new(SingleClientSupplier::new(client_a.clone()));
    let encrypt_supplier_b: Arc<dyn kms_keyring::ClientSupplier> = Arc::new(SingleClientSupplier::new(client_b.clone()));

    let generator = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/a", encrypt_supplier_a).unwrap());
    let child = Arc::new(KmsKeyring::new("arn:aws:kms:eu-west-1:111122223333:key/b", encrypt_supplier_b).unwrap());
    let multi = Arc::new(MultiKeyring::with_generator(generator).add_child(child));
    let cmm = DefaultCmm::new(multi);

    let ctx = EncryptionContext::new();
    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();
    assert_eq!(enc_mat.edks.len(), 2);

    // Decrypting party only has a working client for CMK "b" (CMK "a"'s
    // client here is a distinct, unrelated mock backend, so attempts
    // against it simply find nothing).
    let unrelated_backend: Arc<dyn kms_keyring::ClientSupplier> =
        Arc::new(SingleClientSupplier::new(Arc::new(MockKmsClient::new())));
    let decrypt_supplier_b: Arc<dyn kms_keyring::ClientSupplier> = Arc::new(SingleClientSupplier::new(client_b));

    let decrypt_a = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/a", unrelated_backend).unwrap());
    let decrypt_b = Arc::new(KmsKeyring::new("arn:aws:kms:eu-west-1:111122223333:key/b", decrypt_supplier_b).unwrap());
    let decrypt_multi = Arc::new(MultiKeyring::new(None, vec![decrypt_a, decrypt_b]));
    let decrypt_cmm = DefaultCmm::new(decrypt_multi);

    let dec_mat = decrypt_cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap();
    assert_eq!(dec_mat.data_key.as_slice(), enc_mat.data_key.as_slice());
}

#[test]
fn decrypt_with_no_matching_cmk_reports_cannot_decrypt() {
    let supplier = shared_supplier();
    let encrypt_kr = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/a", supplier.clone()).unwrap());
    let cmm = DefaultCmm::new(encrypt_kr);
    let ctx = EncryptionContext::new();
    let enc_mat = cmm.generate_encryption_materials(&EncryptionRequest::new(&ctx)).unwrap();

    let decrypt_kr = Arc::new(KmsKeyring::new("arn:aws:kms:us-west-2:111122223333:key/different", supplier).unwrap());
    let decrypt_cmm = DefaultCmm::new(decrypt_kr);
    let err = decrypt_cmm
        .decrypt_materials(&DecryptionRequest::new(enc_mat.suite.suite_id, &enc_mat.edks, &enc_mat.encryption_context))
        .unwrap_err();
    assert!(matches!(err, Error::CannotDecrypt(_)));
}
