use std::collections::HashMap;

use kvsign::hash::{hex_md5, HashStrategy, Md5};
use kvsign::{Entries, ErrorKind, Field, FormUrlEncoded, Json, Record, Result, Signable, Signer};
use pretty_assertions::assert_eq;
use serde::Serialize;

use crate::init;

fn base_input() -> HashMap<&'static str, &'static str> {
    HashMap::from([("b", "2"), ("a", "1"), ("sign", "ignored")])
}

#[test]
fn test_defaults_with_empty_secret() -> Result<()> {
    init();

    let signer = Signer::new();
    let s = signer.str_to_sign(&base_input())?;
    assert_eq!(s, "a=1&b=2&key=");
    assert_eq!(signer.sign(&base_input())?, hex_md5(b"a=1&b=2&key="));
    assert_eq!(
        signer.sign(&base_input())?,
        "07f5fc5f92cd3d06b9d96bb77e682d5d"
    );
    Ok(())
}

#[test]
fn test_keep_empty_value() -> Result<()> {
    init();

    let mut input = base_input();
    input.insert("a", "");

    let signer = Signer::builder().no_skip_empty().build();
    let s = signer.str_to_sign(&input)?;
    assert_eq!(s, "a=&b=2&key=");
    Ok(())
}

struct Payment {
    merchant: String,
    amount: u64,
    memo: Option<String>,
}

impl Signable for Payment {
    fn entries(&self) -> Result<Entries> {
        Ok(Entries::Record(vec![
            Field::new("Merchant", &self.merchant).tag("json", "x"),
            Field::new("Amount", self.amount).tag("json", "amount,omitempty"),
            Field::new("Memo", &self.memo),
        ]))
    }
}

#[test]
fn test_record_tag_renames_field() -> Result<()> {
    init();

    let payment = Payment {
        merchant: "M100".to_string(),
        amount: 1200,
        memo: None,
    };

    let tagged = Signer::builder().tag("json").build();
    assert_eq!(tagged.str_to_sign(&payment)?, "amount=1200&x=M100&key=");
    assert_eq!(
        tagged.canonical_pairs(&payment)?,
        vec![
            ("amount".to_string(), "1200".to_string()),
            ("x".to_string(), "M100".to_string()),
        ]
    );

    let untagged = Signer::new();
    assert_eq!(
        untagged.str_to_sign(&payment)?,
        "Amount=1200&Merchant=M100&key="
    );
    Ok(())
}

#[test]
fn test_record_through_references() -> Result<()> {
    let payment = Payment {
        merchant: "M100".to_string(),
        amount: 1,
        memo: Some("gift".to_string()),
    };
    let by_ref = &payment;
    let by_ref_ref = &by_ref;
    let boxed: Box<dyn Signable> = Box::new(Record::new().field("Amount", 1));

    let signer = Signer::new();
    assert_eq!(signer.sign(&payment)?, signer.sign(by_ref_ref)?);
    assert_eq!(signer.str_to_sign(&boxed)?, "Amount=1&key=");
    Ok(())
}

#[test]
fn test_sequence_values() -> Result<()> {
    init();

    let input: HashMap<&str, Vec<&str>> = HashMap::from([
        ("c", vec!["v1", "v2"]),
        ("d", vec![]),
        ("a", vec!["1"]),
    ]);

    let signer = Signer::builder().no_skip_empty().build();
    assert_eq!(signer.str_to_sign(&input)?, "a=1&c=v1&key=");
    Ok(())
}

#[test]
fn test_form_urlencoded_first_value_wins() -> Result<()> {
    let signer = Signer::builder().key("K").build();
    let s = signer.str_to_sign(&FormUrlEncoded("c=v1&b=x%20y&c=v2&sign=abc"))?;
    assert_eq!(s, "b=x y&c=v1&key=K");
    Ok(())
}

#[test]
fn test_json_input() -> Result<()> {
    #[derive(Serialize)]
    struct Notify<'a> {
        out_trade_no: &'a str,
        total_fee: u32,
        attach: Option<&'a str>,
        tags: Vec<&'a str>,
    }

    let signer = Signer::builder().key("K").build();
    let notify = Notify {
        out_trade_no: "T1",
        total_fee: 100,
        attach: None,
        tags: vec!["vip", "new"],
    };
    assert_eq!(
        signer.str_to_sign(&Json(&notify))?,
        "out_trade_no=T1&tags=vip&total_fee=100&key=K"
    );

    let value = serde_json::json!({"b": true, "a": 1.5, "sign": "x"});
    assert_eq!(signer.str_to_sign(&value)?, "a=1.5&b=true&key=K");
    Ok(())
}

#[test]
fn test_unsupported_inputs_fail() {
    let signer = Signer::new();

    let err = signer.sign(&serde_json::json!([1, 2])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedInputKind);

    let err = signer.sign(&Json("plain string")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedInputKind);

    let err = signer
        .sign(&serde_json::json!({"a": {"nested": 1}}))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StringificationError);
    assert!(err.to_string().contains("\"a\""), "{err}");
}

#[test]
fn test_wechat_pay_reference_signature() -> Result<()> {
    let signer = Signer::builder()
        .key("192006250b4c09247ec02edce69f6a2d")
        .hash(Md5::new(true))
        .build();

    let params = HashMap::from([
        ("appid", "wxd930ea5d5a258f4f"),
        ("mch_id", "10000100"),
        ("device_info", "1000"),
        ("body", "test"),
        ("nonce_str", "ibuaiVcKdpRxkhJA"),
    ]);

    let signature = signer.sign(&params)?;
    assert_eq!(signature, "9A0A8659F005D6984697E2CA0A9CF3B7");
    assert_eq!(
        signature,
        Md5::new(true).hash(&signer.str_to_sign(&params)?)
    );
    Ok(())
}

#[test]
fn test_f32_field_signs_shortest_form() -> Result<()> {
    init();

    let record = Record::new().field("amount", 0.1f32);
    assert_eq!(Signer::new().str_to_sign(&record)?, "amount=0.1&key=");
    Ok(())
}
