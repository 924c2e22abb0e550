// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the toggle client.

use hyphen_toggle_core::ToggleCoreError;
use thiserror::Error;

use crate::transport::BoxError;

/// Errors that can occur in the toggle client.
///
/// `Toggle::fetch` returns these directly. The typed getters never do: they
/// hand the error to the registered error observers and return the caller's
/// default value instead.
#[derive(Debug, Error)]
pub enum ToggleError {
	/// No public API key is configured.
	#[error("public API key is required; set it in ToggleOptions or via HYPHEN_PUBLIC_API_KEY")]
	MissingPublicApiKey,

	/// The application id is missing or empty.
	#[error("application id is required; set it in ToggleOptions or via HYPHEN_APPLICATION_ID")]
	MissingApplicationId,

	/// The horizon URL list is empty.
	#[error("No horizon URLs configured. Set horizonUrls or provide a valid publicApiKey.")]
	NoHorizonUrls,

	/// The key does not start with `public_`.
	#[error(transparent)]
	InvalidPublicApiKey(#[from] ToggleCoreError),

	/// A horizon URL answered with a non-success status.
	#[error("HTTP {status} from {url}")]
	Http { url: String, status: u16 },

	/// The request to a horizon URL could not be completed.
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: BoxError,
	},

	/// A horizon URL answered with a body that could not be parsed.
	#[error("invalid response from {url}: {message}")]
	InvalidResponse { url: String, message: String },

	/// Every horizon URL failed; messages are in attempt order.
	#[error("All horizon URLs failed. Last errors: {}", .messages.join(", "))]
	AllHorizonUrlsFailed { messages: Vec<String> },

	/// The service answered but did not evaluate the requested toggle.
	#[error("toggle '{key}' not found in evaluation response")]
	ToggleNotFound { key: String },

	/// The evaluated value could not be converted to the requested type.
	#[error("toggle '{key}' has an unexpected value: {message}")]
	TypeMismatch { key: String, message: String },

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// Failed to serialize a request payload.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl ToggleError {
	/// Returns true for errors caused by the client's own configuration.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			ToggleError::MissingPublicApiKey
				| ToggleError::MissingApplicationId
				| ToggleError::NoHorizonUrls
				| ToggleError::InvalidPublicApiKey(_)
		)
	}
}

/// Result type alias for toggle operations.
pub type Result<T> = std::result::Result<T, ToggleError>;
