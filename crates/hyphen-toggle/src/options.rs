// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Construction-time configuration for [`crate::Toggle`].

use hyphen_common_env::{
	list_var, var, HYPHEN_APPLICATION_ID, HYPHEN_DEFAULT_TARGET_KEY, HYPHEN_ENVIRONMENT,
	HYPHEN_HORIZON_URLS, HYPHEN_PUBLIC_API_KEY,
};
use hyphen_toggle_core::ToggleContext;

use crate::cache::CachingOptions;

/// Options for constructing a [`crate::Toggle`].
///
/// Every field can be changed later through the client's setters.
#[derive(Debug, Clone, Default)]
pub struct ToggleOptions {
	/// Public API key (`public_...`). Also used to derive the default horizon URLs.
	pub public_api_key: Option<String>,
	/// Context used for calls that do not pass their own.
	pub default_context: Option<ToggleContext>,
	/// Explicit horizon URLs, in failover order. Skips derivation from the key.
	pub horizon_urls: Option<Vec<String>>,
	pub application_id: Option<String>,
	/// Defaults to `development`.
	pub environment: Option<String>,
	/// Overrides the derived default targeting key.
	pub default_target_key: Option<String>,
	/// Enables response caching when set.
	pub caching: Option<CachingOptions>,
}

impl ToggleOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads options from `HYPHEN_*` environment variables.
	///
	/// Call `hyphen_common_env::load_env` first to pull in `.env` files.
	pub fn from_env() -> Self {
		Self {
			public_api_key: var(HYPHEN_PUBLIC_API_KEY),
			default_context: None,
			horizon_urls: list_var(HYPHEN_HORIZON_URLS),
			application_id: var(HYPHEN_APPLICATION_ID),
			environment: var(HYPHEN_ENVIRONMENT),
			default_target_key: var(HYPHEN_DEFAULT_TARGET_KEY),
			caching: None,
		}
	}

	pub fn with_public_api_key(mut self, key: impl Into<String>) -> Self {
		self.public_api_key = Some(key.into());
		self
	}

	pub fn with_default_context(mut self, context: ToggleContext) -> Self {
		self.default_context = Some(context);
		self
	}

	pub fn with_horizon_urls<I, S>(mut self, urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.horizon_urls = Some(urls.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
		self.application_id = Some(id.into());
		self
	}

	pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());
		self
	}

	pub fn with_default_target_key(mut self, key: impl Into<String>) -> Self {
		self.default_target_key = Some(key.into());
		self
	}

	pub fn with_caching(mut self, caching: CachingOptions) -> Self {
		self.caching = Some(caching);
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn builder_methods_set_fields() {
		let options = ToggleOptions::new()
			.with_public_api_key("public_abc")
			.with_application_id("my-app")
			.with_environment("production")
			.with_horizon_urls(["https://a.example", "https://b.example"])
			.with_default_target_key("fallback-key")
			.with_default_context(ToggleContext::new().with_targeting_key("t"))
			.with_caching(CachingOptions::new(Duration::from_secs(60)));

		assert_eq!(options.public_api_key.as_deref(), Some("public_abc"));
		assert_eq!(options.application_id.as_deref(), Some("my-app"));
		assert_eq!(options.environment.as_deref(), Some("production"));
		assert_eq!(
			options.horizon_urls,
			Some(vec![
				"https://a.example".to_string(),
				"https://b.example".to_string()
			])
		);
		assert_eq!(options.default_target_key.as_deref(), Some("fallback-key"));
		assert_eq!(
			options.default_context.unwrap().targeting_key.as_deref(),
			Some("t")
		);
		assert_eq!(options.caching.unwrap().ttl, Duration::from_secs(60));
	}

	#[test]
	fn default_options_are_empty() {
		let options = ToggleOptions::default();
		assert!(options.public_api_key.is_none());
		assert!(options.horizon_urls.is_none());
		assert!(options.caching.is_none());
	}
}
