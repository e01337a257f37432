use std::collections::BTreeMap;
use std::collections::HashMap;

use kvsign::hash::{HashAlgorithm, Sha1};
use kvsign::{Config, Result, Signer, SignerBuilder, StaticEnv};
use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::init;

const KEYS: [&str; 8] = ["zeta", "alpha", "Beta", "_x", "a1", "a", "sign", "empty"];

fn value_of(k: &str) -> &'static str {
    match k {
        "empty" => "",
        "sign" => "signature",
        _ => "v",
    }
}

#[test]
fn test_independent_of_insertion_order() -> Result<()> {
    init();

    let signer = Signer::builder().key("K").build();

    let mut forward: HashMap<String, String> = HashMap::new();
    for k in KEYS {
        forward.insert(k.to_string(), value_of(k).to_string());
    }
    let mut backward: HashMap<String, String> = HashMap::with_capacity(64);
    for k in KEYS.iter().rev() {
        backward.insert(k.to_string(), value_of(k).to_string());
    }
    let sorted: BTreeMap<&str, &str> = KEYS.iter().map(|k| (*k, value_of(k))).collect();

    let expected = "Beta=v&_x=v&a=v&a1=v&alpha=v&zeta=v&key=K";
    assert_eq!(signer.str_to_sign(&forward)?, expected);
    assert_eq!(signer.str_to_sign(&backward)?, expected);
    assert_eq!(signer.str_to_sign(&sorted)?, expected);
    assert_eq!(signer.sign(&forward)?, signer.sign(&backward)?);
    assert_eq!(signer.sign(&forward)?, signer.sign(&forward)?);
    Ok(())
}

#[test_case(true, "Beta=v&_x=v&a=v&a1=v&alpha=v&zeta=v&key="; "skip empty")]
#[test_case(false, "Beta=v&_x=v&a=v&a1=v&alpha=v&empty=&zeta=v&key="; "keep empty")]
fn test_ignored_key_never_signed(skip_empty: bool, expected: &str) {
    let input: BTreeMap<&str, &str> = KEYS.iter().map(|k| (*k, value_of(k))).collect();
    let signer = Signer::builder().skip_empty(skip_empty).build();

    let s = signer.str_to_sign(&input).expect("must sign");
    assert_eq!(s, expected);
    assert!(!s.contains("sign="));
}

#[test]
fn test_hash_strategy_only_changes_signature() -> Result<()> {
    let input = HashMap::from([("b", "2"), ("a", "1")]);
    let md5 = Signer::builder().key("K").build();
    let sha1 = md5.to_builder().hash(Sha1::new(false)).build();
    let reversed = md5
        .to_builder()
        .hash(|s: &str| s.chars().rev().collect::<String>())
        .build();

    assert_eq!(md5.str_to_sign(&input)?, sha1.str_to_sign(&input)?);
    assert_eq!(md5.str_to_sign(&input)?, reversed.str_to_sign(&input)?);
    assert_ne!(md5.sign(&input)?, sha1.sign(&input)?);
    assert_eq!(reversed.sign(&input)?, "K=yek&2=b&1=a");
    Ok(())
}

#[test]
fn test_config_from_env_round_trip() -> Result<()> {
    let env = StaticEnv::from_pairs([
        ("KVSIGN_SECRET_KEY", "K"),
        ("KVSIGN_HASH", "sha1"),
        ("KVSIGN_HASH_UPPERCASE", "true"),
        ("KVSIGN_IGNORE_KEYS", "sign,sign_type"),
    ]);
    let config = Config::from_env(&env)?;
    assert_eq!(config.hash, HashAlgorithm::Sha1);

    let signer = SignerBuilder::from_config(config).build();
    let input = HashMap::from([("a", "1"), ("sign_type", "SHA1"), ("sign", "x")]);
    assert_eq!(signer.str_to_sign(&input)?, "a=1&key=K");

    let signature = signer.sign(&input)?;
    assert_eq!(signature, signature.to_ascii_uppercase());
    assert!(signer.verify(&input, &signature.to_ascii_lowercase())?);
    Ok(())
}

#[test]
fn test_config_from_toml() -> Result<()> {
    let config = Config::from_toml(
        r#"
secret_key = "K"
separator = "|"
skip_empty = false
"#,
    )?;
    let signer = SignerBuilder::from(config).build();
    let input = HashMap::from([("b", ""), ("a", "1")]);
    assert_eq!(signer.str_to_sign(&input)?, "a=1|b=|key=K");
    Ok(())
}
