// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sequential failover across horizon URLs.
//!
//! Horizon URLs are a preference-ordered chain, not a pool: each URL is tried
//! to completion before the next one, and the first success wins.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, ToggleError};
use crate::headers::{normalize_headers, HeaderInput, NormalizedHeaders};
use crate::transport::{HttpTransport, TransportRequest};

/// Header carrying the public API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Per-call options for [`crate::Toggle::fetch`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
	/// Extra headers. The public API key header always overrides these.
	pub headers: Option<HeaderInput>,
	/// Raw body used when no payload is given.
	pub body: Option<String>,
}

impl FetchOptions {
	pub fn with_headers(mut self, headers: impl Into<HeaderInput>) -> Self {
		self.headers = Some(headers.into());
		self
	}

	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());
		self
	}
}

/// Joins a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
	format!(
		"{}/{}",
		base.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}

/// Merges caller headers with the client's own.
///
/// Precedence low to high: caller headers, then `content-type` if the caller
/// did not set one, then the public API key.
pub fn build_headers(
	caller: Option<&HeaderInput>,
	public_api_key: Option<&str>,
) -> NormalizedHeaders {
	let mut headers = caller.map(normalize_headers).unwrap_or_default();
	if !headers.contains_ignore_case("content-type") {
		headers.insert("content-type", "application/json");
	}
	if let Some(key) = public_api_key {
		headers.insert_overriding(API_KEY_HEADER, key);
	}
	headers
}

/// POSTs to each horizon URL in order until one succeeds.
///
/// The payload, when given, always takes precedence over `options.body`.
/// Fails with [`ToggleError::NoHorizonUrls`] before any I/O when the list is
/// empty, and with [`ToggleError::AllHorizonUrlsFailed`] when every attempt
/// fails.
pub async fn post_with_failover<T: DeserializeOwned>(
	transport: &dyn HttpTransport,
	horizon_urls: &[String],
	public_api_key: Option<&str>,
	path: &str,
	payload: Option<&Value>,
	options: &FetchOptions,
) -> Result<T> {
	if horizon_urls.is_empty() {
		return Err(ToggleError::NoHorizonUrls);
	}

	let body = match payload {
		Some(payload) => Some(serde_json::to_string(payload)?),
		None => options.body.clone(),
	};
	let headers = build_headers(options.headers.as_ref(), public_api_key);

	let mut messages = Vec::with_capacity(horizon_urls.len());
	for base in horizon_urls {
		let url = join_url(base, path);
		debug!(url = %url, "Posting to horizon URL");

		match attempt(transport, &url, &headers, body.clone()).await {
			Ok(value) => return Ok(value),
			Err(err) => {
				warn!(url = %url, error = %err, "Horizon URL failed");
				messages.push(err.to_string());
			}
		}
	}

	Err(ToggleError::AllHorizonUrlsFailed { messages })
}

async fn attempt<T: DeserializeOwned>(
	transport: &dyn HttpTransport,
	url: &str,
	headers: &NormalizedHeaders,
	body: Option<String>,
) -> Result<T> {
	let request = TransportRequest {
		url: url.to_string(),
		headers: headers.clone(),
		body,
	};

	let response = transport
		.post(request)
		.await
		.map_err(|source| ToggleError::Transport {
			url: url.to_string(),
			source,
		})?;

	if !response.is_success() {
		return Err(ToggleError::Http {
			url: url.to_string(),
			status: response.status,
		});
	}

	serde_json::from_slice(&response.body).map_err(|e| ToggleError::InvalidResponse {
		url: url.to_string(),
		message: e.to_string(),
	})
}
