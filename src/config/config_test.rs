use super::*;

#[test]
fn test_default_is_lp64() {
    let profile = AbiProfile::default();
    assert_eq!(profile, AbiProfile::lp64());
    assert_eq!(profile.long_width, 8);
    assert_eq!(profile.pointer_width, 64);
    assert!(profile.char_signed);
}

#[test]
fn test_profile_from_toml() {
    let profile = AbiProfile::from_toml(
        r#"
        pointer_width = 32
        long_width = 4
        char_signed = false
    "#,
    )
    .unwrap();

    assert_eq!(profile.pointer_width, 32);
    assert_eq!(profile.long_width, 4);
    assert!(!profile.char_signed);
}

#[test]
fn test_profile_toml_defaults_missing_keys() {
    let profile = AbiProfile::from_toml("long_width = 4").unwrap();
    assert_eq!(profile.long_width, 4);
    assert_eq!(profile.pointer_width, 64);
}

#[test]
fn test_profile_rejects_bad_widths() {
    assert!(AbiProfile::from_toml("pointer_width = 16").is_err());
    assert!(AbiProfile::from_toml("long_width = 2").is_err());
    assert!(AbiProfile::from_toml("unknown_key = 1").is_err());
}
