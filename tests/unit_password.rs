use fabriq_core::password::{hash_password, verify_password};

#[test]
fn test_hash_password_produces_bcrypt_hash() {
    let hash = hash_password("secret-password").unwrap();
    assert_ne!(hash, "secret-password");
    assert!(hash.starts_with("$2"));
}

#[test]
fn test_verify_password_success() {
    let hash = hash_password("secret-password").unwrap();
    assert!(verify_password("secret-password", &hash).unwrap());
}

#[test]
fn test_verify_password_wrong_password() {
    let hash = hash_password("secret-password").unwrap();
    assert!(!verify_password("wrong-password", &hash).unwrap());
}

#[test]
fn test_same_password_hashes_differently() {
    let first = hash_password("secret-password").unwrap();
    let second = hash_password("secret-password").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_verify_password_garbage_hash_errors() {
    assert!(verify_password("secret-password", "not-a-hash").is_err());
}
