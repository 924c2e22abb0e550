// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Horizon URL derivation.
//!
//! Horizon URLs are the candidate base URLs of the evaluation service. The
//! list order is the failover order: the organization-specific endpoint is
//! tried before the shared one.

use crate::public_key::org_id_from_public_key;

/// Domain the evaluation service is served from.
pub const SERVICE_DOMAIN: &str = "toggle.hyphen.cloud";

/// Horizon URL used when no organization id can be derived.
pub const FALLBACK_HORIZON_URL: &str = "https://toggle.hyphen.cloud";

/// Returns the organization-specific horizon URL for `key`, or the fallback.
pub fn default_horizon_url(key: Option<&str>) -> String {
	match key.and_then(org_id_from_public_key) {
		Some(org_id) => format!("https://{org_id}.{SERVICE_DOMAIN}"),
		None => FALLBACK_HORIZON_URL.to_string(),
	}
}

/// Returns the default failover list for `key`.
///
/// With a derivable organization id this is `[org-specific, fallback]`;
/// otherwise it is just `[fallback]`.
pub fn default_horizon_urls(key: Option<&str>) -> Vec<String> {
	let primary = default_horizon_url(key);
	if primary == FALLBACK_HORIZON_URL {
		vec![primary]
	} else {
		vec![primary, FALLBACK_HORIZON_URL.to_string()]
	}
}
