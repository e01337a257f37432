//! Core components for signing key-value API payloads.
//!
//! Payment gateways and webhook providers commonly sign a request by
//! sorting its parameters, joining them as `k1=v1&k2=v2`, appending a secret
//! and hashing the result. This crate implements that pipeline with every
//! step configurable.
//!
//! ## Overview
//!
//! - **Signable**: inputs expose their fields or entries explicitly, no reflection involved
//! - **Pipeline**: [`canonical`] extracts, filters, orders and joins the pairs
//! - **Strategies**: [`PairJoin`], [`PostProcess`] and [`hash::HashStrategy`] are pluggable
//! - **Signer**: an immutable facade built with [`SignerBuilder`] or from a [`Config`]
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//! use kvsign_core::{Signer, hash::Sha1};
//!
//! let signer = Signer::builder()
//!     .key("merchant-secret")
//!     .hash(Sha1::new(true))
//!     .build();
//!
//! let params = HashMap::from([
//!     ("out_trade_no", "T1001"),
//!     ("total_fee", "100"),
//!     ("sign", ""),
//! ]);
//!
//! assert_eq!(
//!     signer.str_to_sign(&params)?,
//!     "out_trade_no=T1001&total_fee=100&key=merchant-secret"
//! );
//! let signature = signer.sign(&params)?;
//! assert!(signer.verify(&params, &signature)?);
//! # Ok::<(), kvsign_core::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! A [`Signer`] is frozen once built. It is `Send + Sync` and cheap to clone,
//! so one signer can serve any number of threads. Strategies must be pure.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod canonical;
pub mod hash;
pub mod utils;

mod constants;

mod error;
pub use error::{Error, ErrorKind, Result};
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod value;
pub use value::{ToValue, Value};
mod signable;
pub use signable::{Entries, Field, FormUrlEncoded, Json, Record, Signable};
mod join;
pub use join::{KeyValue, PairJoin, PercentEncoded, RFC3986_UNRESERVED};
mod post_process;
pub use post_process::{AppendKey, NoKey, PostProcess, PrependKey, SkipEmptyKey};
mod config;
pub use config::Config;
mod signer;
pub use signer::{Signer, SignerBuilder};
