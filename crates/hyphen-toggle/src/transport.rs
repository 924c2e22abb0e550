// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP transport seam.
//!
//! The failover driver only needs "POST these bytes with these headers and
//! tell me the status and body". [`HttpTransport`] captures that; the default
//! implementation is [`ReqwestTransport`].

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use tracing::warn;

use crate::headers::NormalizedHeaders;

/// Boxed error returned by transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A single POST request to one horizon URL.
#[derive(Debug, Clone)]
pub struct TransportRequest {
	pub url: String,
	pub headers: NormalizedHeaders,
	pub body: Option<String>,
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
	pub status: u16,
	pub body: Bytes,
}

impl TransportResponse {
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Sends POST requests on behalf of the toggle client.
///
/// Timeouts and cancellation belong to the implementation; the client adds
/// none of its own.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

/// [`HttpTransport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
	client: Client,
}

impl ReqwestTransport {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
	async fn post(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
		let mut builder = self
			.client
			.post(&request.url)
			.headers(to_header_map(&request.headers));
		if let Some(body) = request.body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let status = response.status().as_u16();
		let body = response.bytes().await?;

		Ok(TransportResponse { status, body })
	}
}

/// Converts normalized headers into a `HeaderMap`.
///
/// Later entries replace earlier ones with the same (case-insensitive) name,
/// so the merge order of [`NormalizedHeaders`] is preserved on the wire.
fn to_header_map(headers: &NormalizedHeaders) -> HeaderMap {
	let mut map = HeaderMap::new();
	for (name, value) in headers.iter() {
		match (
			HeaderName::from_bytes(name.as_bytes()),
			HeaderValue::from_str(value),
		) {
			(Ok(name), Ok(value)) => {
				map.insert(name, value);
			}
			_ => warn!(header = %name, "Dropping header with invalid name or value"),
		}
	}
	map
}
