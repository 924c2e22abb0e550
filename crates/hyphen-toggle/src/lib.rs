// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Feature toggle evaluation client for Hyphen.
//!
//! The client sends an evaluation request for the configured application and
//! environment to the first reachable horizon URL and returns typed toggle
//! values. Getters never fail: misconfiguration, network errors and unknown
//! toggles all resolve to the caller's default value, and the error is handed
//! to observers registered with [`Toggle::on_error`].
//!
//! # Example
//!
//! ```ignore
//! use hyphen_toggle::{GetOptions, Toggle, ToggleOptions};
//!
//! #[tokio::main]
//! async fn main() -> hyphen_toggle::Result<()> {
//!     hyphen_common_env::load_env(&Default::default()).ok();
//!     let toggle = Toggle::new(ToggleOptions::from_env())?;
//!
//!     if toggle.get_boolean("new-checkout", false, GetOptions::default()).await {
//!         println!("new checkout enabled");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Horizon URLs
//!
//! Without explicit URLs the client derives them from the public API key:
//! `https://<org>.toggle.hyphen.cloud` followed by `https://toggle.hyphen.cloud`.
//! Keys that do not encode an organization id use the latter only.

pub mod cache;
pub mod client;
pub mod error;
mod evaluation;
pub mod failover;
pub mod headers;
pub mod hooks;
pub mod options;
pub mod transport;

pub use cache::{CacheKeyFn, CachingOptions};
pub use client::{Toggle, ToggleBuilder, DEFAULT_REQUEST_TIMEOUT, EVALUATE_PATH};
pub use error::{Result, ToggleError};
pub use failover::{build_headers, join_url, post_with_failover, FetchOptions, API_KEY_HEADER};
pub use headers::{normalize_headers, HeaderInput, NormalizedHeaders};
pub use hooks::{AfterGetHook, BeforeGetHook, GetData, GetOptions, GetResultData, HookPoint};
pub use options::ToggleOptions;
pub use transport::{BoxError, HttpTransport, ReqwestTransport, TransportRequest, TransportResponse};

pub use hyphen_toggle_core::{
	default_horizon_url, default_horizon_urls, org_id_from_public_key, Evaluation,
	EvaluationResponse, ToggleContext, ToggleEvaluation, ToggleType, ToggleUser,
	FALLBACK_HORIZON_URL, PUBLIC_KEY_PREFIX,
};
