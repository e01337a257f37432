#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use kvsign_core::*;

/// Build a signer from `KVSIGN_*` environment variables of this process.
///
/// Unset variables keep their default, see [`Config::from_env`].
#[cfg(feature = "os-env")]
pub fn signer_from_env() -> Result<Signer> {
    let config = Config::from_env(&OsEnv)?;
    log::debug!("loaded signer config from env: {config:?}");
    Ok(SignerBuilder::from_config(config).build())
}
