use pantry_util::hash::{is_sha256_hex, sha256_bytes};

#[test]
fn test_sha256_bytes_empty() {
    let hash = sha256_bytes(b"");
    assert_eq!(
        hash,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_sha256_bytes_hello() {
    let hash = sha256_bytes(b"hello");
    assert_eq!(
        hash,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_sha256_output_is_recognised() {
    assert!(is_sha256_hex(&sha256_bytes(b"pantry")));
}

#[test]
fn test_is_sha256_hex_rejects_wrong_length() {
    assert!(!is_sha256_hex("abc123"));
    assert!(!is_sha256_hex(""));
}

#[test]
fn test_is_sha256_hex_rejects_uppercase_and_non_hex() {
    let upper = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
    assert!(!is_sha256_hex(upper));
    let bad = "g3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    assert!(!is_sha256_hex(bad));
}
