use anyhow::Result;
use kvsign::{FormUrlEncoded, Signer};

fn main() -> Result<()> {
    env_logger::init();

    // Load KVSIGN_SECRET_KEY, KVSIGN_HASH and friends from the environment.
    let signer: Signer = kvsign::signer_from_env()?;

    let body = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "out_trade_no=T1001&total_fee=100&trade_status=SUCCESS".to_string());
    let input = FormUrlEncoded(&body);

    println!("string to sign: {}", signer.str_to_sign(&input)?);
    println!("signature:      {}", signer.sign(&input)?);

    Ok(())
}
