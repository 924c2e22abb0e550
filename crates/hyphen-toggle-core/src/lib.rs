// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Hyphen toggle evaluation client.
//!
//! This crate holds the pieces of the toggle client that do no I/O:
//! - The evaluation context sent with every request ([`ToggleContext`], [`ToggleUser`])
//! - The wire payload and response shapes ([`ToggleEvaluation`], [`EvaluationResponse`])
//! - Organization id derivation from a public API key ([`org_id_from_public_key`])
//! - Horizon URL derivation ([`default_horizon_urls`])
//! - Targeting key resolution and generation ([`resolve_targeting_key`], [`generate_target_key`])
//!
//! It is used by the `hyphen-toggle` client SDK.
//!
//! # Example
//!
//! ```
//! use hyphen_toggle_core::{default_horizon_urls, ToggleContext, ToggleUser};
//!
//! let ctx = ToggleContext::new()
//!     .with_ip_address("203.0.113.42")
//!     .with_user(ToggleUser::new("user-123").with_email("jane@example.com"));
//!
//! assert_eq!(
//!     default_horizon_urls(None),
//!     vec!["https://toggle.hyphen.cloud".to_string()]
//! );
//! ```

pub mod context;
pub mod error;
pub mod evaluation;
pub mod horizon;
pub mod public_key;
pub mod targeting;

pub use context::{ToggleContext, ToggleUser};
pub use error::{Result, ToggleCoreError};
pub use evaluation::{Evaluation, EvaluationResponse, ToggleEvaluation, ToggleType};
pub use horizon::{
	default_horizon_url, default_horizon_urls, FALLBACK_HORIZON_URL, SERVICE_DOMAIN,
};
pub use public_key::{org_id_from_public_key, validate_public_api_key, PUBLIC_KEY_PREFIX};
pub use targeting::{
	default_targeting_key, generate_target_key, resolve_targeting_key, FastrandSuffix,
	KeySuffixGenerator,
};

/// Environment name used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";
