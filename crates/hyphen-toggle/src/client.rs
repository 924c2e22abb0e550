// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Toggle evaluation client.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use hyphen_toggle_core::{
	default_horizon_urls, default_targeting_key, generate_target_key, org_id_from_public_key,
	resolve_targeting_key, validate_public_api_key, EvaluationResponse, FastrandSuffix,
	KeySuffixGenerator, ToggleContext, ToggleEvaluation, DEFAULT_ENVIRONMENT,
};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::cache::{CachingOptions, ResponseCache};
use crate::error::{Result, ToggleError};
use crate::evaluation::{build_evaluation, ConfigSnapshot};
use crate::failover::{post_with_failover, FetchOptions};
use crate::hooks::{GetData, GetOptions, GetResultData, HookPoint, Hooks};
use crate::options::ToggleOptions;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Path of the evaluation endpoint, relative to a horizon URL.
pub const EVALUATE_PATH: &str = "toggle/evaluate";

/// Default timeout for a single horizon URL attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type ErrorObserver = Arc<dyn Fn(&ToggleError) + Send + Sync>;

/// Builder for constructing a [`Toggle`].
pub struct ToggleBuilder {
	options: ToggleOptions,
	transport: Option<Arc<dyn HttpTransport>>,
	key_suffix: Option<Arc<dyn KeySuffixGenerator>>,
	request_timeout: Duration,
}

impl ToggleBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			options: ToggleOptions::default(),
			transport: None,
			key_suffix: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	/// Replaces all options at once.
	pub fn options(mut self, options: ToggleOptions) -> Self {
		self.options = options;
		self
	}

	pub fn public_api_key(mut self, key: impl Into<String>) -> Self {
		self.options.public_api_key = Some(key.into());
		self
	}

	pub fn application_id(mut self, id: impl Into<String>) -> Self {
		self.options.application_id = Some(id.into());
		self
	}

	pub fn environment(mut self, environment: impl Into<String>) -> Self {
		self.options.environment = Some(environment.into());
		self
	}

	pub fn default_context(mut self, context: ToggleContext) -> Self {
		self.options.default_context = Some(context);
		self
	}

	pub fn horizon_urls<I, S>(mut self, urls: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.options.horizon_urls = Some(urls.into_iter().map(Into::into).collect());
		self
	}

	pub fn default_target_key(mut self, key: impl Into<String>) -> Self {
		self.options.default_target_key = Some(key.into());
		self
	}

	pub fn caching(mut self, caching: CachingOptions) -> Self {
		self.options.caching = Some(caching);
		self
	}

	/// Uses a custom transport instead of the default `reqwest` one.
	pub fn transport(mut self, transport: impl HttpTransport) -> Self {
		self.transport = Some(Arc::new(transport));
		self
	}

	/// Uses a custom suffix source for generated targeting keys.
	pub fn key_suffix_generator(mut self, generator: impl KeySuffixGenerator) -> Self {
		self.key_suffix = Some(Arc::new(generator));
		self
	}

	/// Sets the per-attempt HTTP timeout of the default transport.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Builds the client.
	///
	/// Fails only when the public API key lacks the `public_` prefix or the
	/// HTTP client cannot be constructed. Missing keys and application ids
	/// are reported per call instead.
	pub fn build(self) -> Result<Toggle> {
		let options = self.options;
		if let Some(key) = &options.public_api_key {
			validate_public_api_key(key)?;
		}

		let environment = options
			.environment
			.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
		let key_suffix = self
			.key_suffix
			.unwrap_or_else(|| Arc::new(FastrandSuffix) as Arc<dyn KeySuffixGenerator>);

		let default_targeting_key = default_targeting_key(
			options.default_target_key.as_deref(),
			options.default_context.as_ref(),
			options.application_id.as_deref(),
			Some(environment.as_str()),
			key_suffix.as_ref(),
		);

		let (horizon_urls, horizon_urls_explicit) = match options.horizon_urls {
			Some(urls) => (urls, true),
			None => (default_horizon_urls(options.public_api_key.as_deref()), false),
		};

		let transport: Arc<dyn HttpTransport> = match self.transport {
			Some(transport) => transport,
			None => {
				let client = hyphen_common_http::builder()
					.timeout(self.request_timeout)
					.build()
					.map_err(ToggleError::ClientBuild)?;
				Arc::new(ReqwestTransport::new(client))
			}
		};

		let state = ToggleState {
			organization_id: options
				.public_api_key
				.as_deref()
				.and_then(org_id_from_public_key),
			public_api_key: options.public_api_key,
			application_id: options.application_id,
			environment,
			default_context: options.default_context,
			default_targeting_key,
			horizon_urls,
			horizon_urls_explicit,
			cache: options.caching.map(|c| Arc::new(ResponseCache::new(c))),
		};

		info!(
			horizon_urls = ?state.horizon_urls,
			application_id = ?state.application_id,
			environment = %state.environment,
			caching = state.cache.is_some(),
			"Toggle client initialized"
		);

		Ok(Toggle {
			inner: Arc::new(ToggleInner {
				state: RwLock::new(state),
				hooks: RwLock::new(Hooks::default()),
				error_observers: RwLock::new(Vec::new()),
				transport,
				key_suffix,
			}),
		})
	}
}

impl Default for ToggleBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Mutable client configuration.
struct ToggleState {
	public_api_key: Option<String>,
	/// Always derived from `public_api_key`.
	organization_id: Option<String>,
	application_id: Option<String>,
	environment: String,
	default_context: Option<ToggleContext>,
	default_targeting_key: String,
	horizon_urls: Vec<String>,
	/// False while the URLs are still the ones derived from the key.
	horizon_urls_explicit: bool,
	cache: Option<Arc<ResponseCache>>,
}

impl ToggleState {
	fn snapshot(&self) -> ConfigSnapshot {
		ConfigSnapshot {
			public_api_key: self.public_api_key.clone(),
			application_id: self.application_id.clone(),
			environment: self.environment.clone(),
			default_context: self.default_context.clone(),
			default_targeting_key: self.default_targeting_key.clone(),
			horizon_urls: self.horizon_urls.clone(),
			cache: self.cache.clone(),
		}
	}

	fn apply_public_api_key(&mut self, key: Option<String>) {
		self.organization_id = key.as_deref().and_then(org_id_from_public_key);
		if !self.horizon_urls_explicit {
			self.horizon_urls = default_horizon_urls(key.as_deref());
		}
		self.public_api_key = key;
		self.reset_cache();
	}

	/// Drops cached responses while keeping the caching options.
	///
	/// Cached evaluations belong to one key and one set of horizon URLs.
	fn reset_cache(&mut self) {
		self.cache = self
			.cache
			.as_ref()
			.map(|cache| Arc::new(ResponseCache::new(cache.options().clone())));
	}
}

struct ToggleInner {
	state: RwLock<ToggleState>,
	hooks: RwLock<Hooks>,
	error_observers: RwLock<Vec<ErrorObserver>>,
	transport: Arc<dyn HttpTransport>,
	key_suffix: Arc<dyn KeySuffixGenerator>,
}

/// Client for evaluating feature toggles.
///
/// The typed getters never fail: when the service cannot be reached, the
/// client is misconfigured, or the toggle is not defined, they notify the
/// error observers and return the caller's default.
///
/// # Example
///
/// ```ignore
/// use hyphen_toggle::{GetOptions, Toggle, ToggleContext, ToggleOptions};
///
/// let toggle = Toggle::new(
///     ToggleOptions::new()
///         .with_public_api_key("public_...")
///         .with_application_id("my-app")
///         .with_environment("production"),
/// )?;
///
/// toggle.on_error(|err| eprintln!("toggle error: {err}"));
///
/// let enabled = toggle.get_boolean("new-checkout", false, GetOptions::default()).await;
/// let theme = toggle
///     .get_string(
///         "theme",
///         "light",
///         GetOptions::with_context(ToggleContext::new().with_targeting_key("user-123")),
///     )
///     .await;
/// ```
#[derive(Clone)]
pub struct Toggle {
	inner: Arc<ToggleInner>,
}

impl Toggle {
	/// Creates a new builder for constructing a Toggle.
	pub fn builder() -> ToggleBuilder {
		ToggleBuilder::new()
	}

	/// Creates a client with the default transport.
	pub fn new(options: ToggleOptions) -> Result<Self> {
		Self::builder().options(options).build()
	}

	pub fn public_api_key(&self) -> Option<String> {
		self.inner.state.read().public_api_key.clone()
	}

	/// Sets the public API key.
	///
	/// Keys without the `public_` prefix are rejected and leave the client
	/// unchanged. The organization id is recomputed, and so are the horizon
	/// URLs unless they were set explicitly. Cached responses are dropped.
	pub fn set_public_api_key(&self, key: impl Into<String>) -> Result<()> {
		let key = key.into();
		validate_public_api_key(&key)?;
		let mut state = self.inner.state.write();
		state.apply_public_api_key(Some(key));
		debug!(
			organization_id = ?state.organization_id,
			horizon_urls = ?state.horizon_urls,
			"Public API key updated"
		);
		Ok(())
	}

	pub fn clear_public_api_key(&self) {
		self.inner.state.write().apply_public_api_key(None);
	}

	/// Organization id derived from the current public API key.
	pub fn organization_id(&self) -> Option<String> {
		self.inner.state.read().organization_id.clone()
	}

	pub fn application_id(&self) -> Option<String> {
		self.inner.state.read().application_id.clone()
	}

	pub fn set_application_id(&self, id: Option<String>) {
		self.inner.state.write().application_id = id;
	}

	pub fn environment(&self) -> String {
		self.inner.state.read().environment.clone()
	}

	pub fn set_environment(&self, environment: impl Into<String>) {
		self.inner.state.write().environment = environment.into();
	}

	pub fn default_context(&self) -> Option<ToggleContext> {
		self.inner.state.read().default_context.clone()
	}

	/// Replaces the default context.
	///
	/// The default targeting key is not recomputed.
	pub fn set_default_context(&self, context: Option<ToggleContext>) {
		self.inner.state.write().default_context = context;
	}

	pub fn default_targeting_key(&self) -> String {
		self.inner.state.read().default_targeting_key.clone()
	}

	pub fn set_default_targeting_key(&self, key: impl Into<String>) {
		self.inner.state.write().default_targeting_key = key.into();
	}

	pub fn horizon_urls(&self) -> Vec<String> {
		self.inner.state.read().horizon_urls.clone()
	}

	/// Sets the horizon URLs explicitly, in failover order.
	///
	/// An empty list is kept as-is; every later call then fails with
	/// [`ToggleError::NoHorizonUrls`]. Cached responses are dropped.
	pub fn set_horizon_urls<I, S>(&self, urls: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut state = self.inner.state.write();
		state.horizon_urls = urls.into_iter().map(Into::into).collect();
		state.horizon_urls_explicit = true;
		state.reset_cache();
	}

	pub fn caching(&self) -> Option<CachingOptions> {
		self.inner
			.state
			.read()
			.cache
			.as_ref()
			.map(|cache| cache.options().clone())
	}

	/// Enables, replaces, or disables response caching. Cached entries are dropped.
	pub fn set_caching(&self, caching: Option<CachingOptions>) {
		self.inner.state.write().cache = caching.map(|c| Arc::new(ResponseCache::new(c)));
	}

	/// Generates a fresh `application-environment-suffix` targeting key.
	///
	/// Does not change the client's default targeting key.
	pub fn generate_target_key(&self) -> String {
		let state = self.inner.state.read();
		generate_target_key(
			state.application_id.as_deref(),
			Some(state.environment.as_str()),
			self.inner.key_suffix.as_ref(),
		)
	}

	/// Resolves the targeting key for `context` against the client's default.
	pub fn targeting_key(&self, context: &ToggleContext) -> String {
		resolve_targeting_key(context, &self.inner.state.read().default_targeting_key)
	}

	/// Registers a hook run before each evaluation.
	pub fn on_before_get<F>(&self, hook: F)
	where
		F: Fn(&mut GetData) + Send + Sync + 'static,
	{
		self.inner.hooks.write().add_before_get(Arc::new(hook));
	}

	/// Registers a hook run after each successful evaluation.
	pub fn on_after_get<F>(&self, hook: F)
	where
		F: Fn(&mut GetResultData) + Send + Sync + 'static,
	{
		self.inner.hooks.write().add_after_get(Arc::new(hook));
	}

	pub fn clear_hooks(&self, point: HookPoint) {
		self.inner.hooks.write().clear(point);
	}

	pub fn hook_count(&self, point: HookPoint) -> usize {
		self.inner.hooks.read().count(point)
	}

	/// Registers an observer invoked whenever a getter falls back to its default.
	pub fn on_error<F>(&self, observer: F)
	where
		F: Fn(&ToggleError) + Send + Sync + 'static,
	{
		self.inner.error_observers.write().push(Arc::new(observer));
	}

	pub fn clear_error_observers(&self) {
		self.inner.error_observers.write().clear();
	}

	/// Evaluates `toggle_key`, returning `default_value` on any failure.
	///
	/// This is the single evaluation entry point; the typed getters are thin
	/// wrappers around it. String values holding JSON are parsed when `T` is
	/// not itself a string.
	pub async fn get<T>(&self, toggle_key: &str, default_value: T, options: GetOptions) -> T
	where
		T: Serialize + DeserializeOwned,
	{
		match self.try_get(toggle_key, &default_value, options).await {
			Ok(value) => value,
			Err(err) => {
				self.emit_error(toggle_key, &err);
				default_value
			}
		}
	}

	pub async fn get_boolean(
		&self,
		toggle_key: &str,
		default_value: bool,
		options: GetOptions,
	) -> bool {
		self.get(toggle_key, default_value, options).await
	}

	pub async fn get_string(
		&self,
		toggle_key: &str,
		default_value: impl Into<String>,
		options: GetOptions,
	) -> String {
		self.get(toggle_key, default_value.into(), options).await
	}

	pub async fn get_number(
		&self,
		toggle_key: &str,
		default_value: f64,
		options: GetOptions,
	) -> f64 {
		self.get(toggle_key, default_value, options).await
	}

	pub async fn get_object<T>(&self, toggle_key: &str, default_value: T, options: GetOptions) -> T
	where
		T: Serialize + DeserializeOwned,
	{
		self.get(toggle_key, default_value, options).await
	}

	/// POSTs `payload` (or `options.body`) to `path` on each horizon URL in order.
	///
	/// Unlike the getters this returns every error to the caller.
	pub async fn fetch<T: DeserializeOwned>(
		&self,
		path: &str,
		payload: Option<Value>,
		options: FetchOptions,
	) -> Result<T> {
		let snapshot = self.snapshot();
		post_with_failover(
			self.inner.transport.as_ref(),
			&snapshot.horizon_urls,
			snapshot.public_api_key.as_deref(),
			path,
			payload.as_ref(),
			&options,
		)
		.await
	}

	async fn try_get<T>(
		&self,
		toggle_key: &str,
		default_value: &T,
		options: GetOptions,
	) -> Result<T>
	where
		T: Serialize + DeserializeOwned,
	{
		let hooks = self.inner.hooks.read().clone();

		let mut data = GetData {
			key: toggle_key.to_string(),
			default_value: serde_json::to_value(default_value)?,
			options,
		};
		hooks.run_before_get(&mut data);

		let snapshot = self.snapshot();
		let payload = build_evaluation(&snapshot, data.options.context.as_ref())?;
		debug!(
			toggle_key = %data.key,
			targeting_key = ?payload.context.targeting_key,
			"Evaluating toggle"
		);

		let response = self.evaluate(&snapshot, &payload).await?;
		let evaluation = response
			.toggles
			.get(&data.key)
			.cloned()
			.ok_or_else(|| ToggleError::ToggleNotFound {
				key: data.key.clone(),
			})?;

		let mut result = GetResultData {
			key: data.key,
			default_value: data.default_value,
			options: data.options,
			result: evaluation.value.clone(),
			evaluation,
		};
		hooks.run_after_get(&mut result);

		coerce(&result.key, &result.result)
	}

	async fn evaluate(
		&self,
		snapshot: &ConfigSnapshot,
		payload: &ToggleEvaluation,
	) -> Result<EvaluationResponse> {
		let cached = snapshot
			.cache
			.as_ref()
			.map(|cache| (cache, cache.key_for(payload)));
		if let Some((cache, key)) = &cached {
			if let Some(response) = cache.get(key) {
				debug!("Evaluation served from cache");
				return Ok(response);
			}
		}

		let body = serde_json::to_value(payload)?;
		let response: EvaluationResponse = post_with_failover(
			self.inner.transport.as_ref(),
			&snapshot.horizon_urls,
			snapshot.public_api_key.as_deref(),
			EVALUATE_PATH,
			Some(&body),
			&FetchOptions::default(),
		)
		.await?;

		if let Some((cache, key)) = cached {
			cache.insert(key, response.clone());
		}
		Ok(response)
	}

	fn snapshot(&self) -> ConfigSnapshot {
		self.inner.state.read().snapshot()
	}

	fn emit_error(&self, toggle_key: &str, err: &ToggleError) {
		error!(
			toggle_key = %toggle_key,
			error = %err,
			"Toggle evaluation failed, returning default value"
		);
		let observers = self.inner.error_observers.read().clone();
		for observer in observers {
			observer(err);
		}
	}
}

impl fmt::Debug for Toggle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.read();
		f.debug_struct("Toggle")
			.field("organization_id", &state.organization_id)
			.field("application_id", &state.application_id)
			.field("environment", &state.environment)
			.field("horizon_urls", &state.horizon_urls)
			.field("default_targeting_key", &state.default_targeting_key)
			.field("hooks", &*self.inner.hooks.read())
			.finish()
	}
}

/// Converts an evaluated value into the caller's type.
fn coerce<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
	match T::deserialize(value) {
		Ok(typed) => Ok(typed),
		Err(err) => {
			if let Value::String(raw) = value {
				if let Ok(typed) = serde_json::from_str(raw) {
					return Ok(typed);
				}
			}
			Err(ToggleError::TypeMismatch {
				key: key.to_string(),
				message: err.to_string(),
			})
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::{BoxError, TransportRequest, TransportResponse};
	use async_trait::async_trait;
	use base64::engine::general_purpose::STANDARD;
	use base64::Engine;
	use hyphen_toggle_core::{ToggleUser, FALLBACK_HORIZON_URL};
	use serde::Deserialize;
	use serde_json::json;
	use std::sync::atomic::{AtomicUsize, Ordering};

	/// Counts requests and always fails; the tests below must never reach it.
	#[derive(Default, Clone)]
	struct CountingTransport {
		calls: Arc<AtomicUsize>,
	}

	#[async_trait]
	impl HttpTransport for CountingTransport {
		async fn post(
			&self,
			_request: TransportRequest,
		) -> std::result::Result<TransportResponse, BoxError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Err("unreachable".into())
		}
	}

	fn acme_key() -> String {
		format!("public_{}", STANDARD.encode("acme:secret"))
	}

	#[test]
	fn new_without_options_uses_defaults() {
		let toggle = Toggle::new(ToggleOptions::default()).unwrap();
		assert_eq!(toggle.environment(), "development");
		assert_eq!(toggle.horizon_urls(), vec![FALLBACK_HORIZON_URL]);
		assert!(toggle.public_api_key().is_none());
		assert!(toggle.organization_id().is_none());
		assert!(toggle.default_targeting_key().starts_with("development-"));
	}

	#[test]
	fn generated_default_targeting_key_has_expected_shape() {
		let toggle = Toggle::new(
			ToggleOptions::new()
				.with_application_id("app")
				.with_environment("production"),
		)
		.unwrap();

		let key = toggle.default_targeting_key();
		let suffix = key.strip_prefix("app-production-").unwrap();
		assert!(!suffix.is_empty());
		assert!(suffix
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
	}

	#[test]
	fn injected_suffix_makes_targeting_key_deterministic() {
		let toggle = Toggle::builder()
			.application_id("app")
			.environment("production")
			.key_suffix_generator(|| "fixed99".to_string())
			.build()
			.unwrap();

		assert_eq!(toggle.default_targeting_key(), "app-production-fixed99");
		assert_eq!(toggle.generate_target_key(), "app-production-fixed99");
	}

	#[test]
	fn independently_built_clients_get_different_targeting_keys() {
		let options = ToggleOptions::new()
			.with_application_id("app")
			.with_environment("production");
		let keys: std::collections::HashSet<String> = (0..5)
			.map(|_| Toggle::new(options.clone()).unwrap().default_targeting_key())
			.collect();
		assert!(keys.len() > 1);
	}

	#[test]
	fn default_targeting_key_precedence() {
		let ctx = ToggleContext::new()
			.with_targeting_key("ctx-key")
			.with_user(ToggleUser::new("user-id"));

		let explicit = Toggle::builder()
			.default_target_key("explicit")
			.default_context(ctx.clone())
			.build()
			.unwrap();
		assert_eq!(explicit.default_targeting_key(), "explicit");

		let from_context = Toggle::builder().default_context(ctx).build().unwrap();
		assert_eq!(from_context.default_targeting_key(), "ctx-key");

		let from_user = Toggle::builder()
			.default_context(ToggleContext::new().with_user(ToggleUser::new("user-id")))
			.build()
			.unwrap();
		assert_eq!(from_user.default_targeting_key(), "user-id");
	}

	#[test]
	fn org_key_derives_primary_and_fallback_urls() {
		let toggle = Toggle::new(ToggleOptions::new().with_public_api_key(acme_key())).unwrap();
		assert_eq!(toggle.organization_id().as_deref(), Some("acme"));
		assert_eq!(
			toggle.horizon_urls(),
			vec![
				"https://acme.toggle.hyphen.cloud".to_string(),
				"https://toggle.hyphen.cloud".to_string(),
			]
		);
	}

	#[test]
	fn explicit_urls_skip_derivation() {
		let toggle = Toggle::new(
			ToggleOptions::new()
				.with_public_api_key(acme_key())
				.with_horizon_urls(["https://toggle.example"]),
		)
		.unwrap();
		assert_eq!(toggle.horizon_urls(), vec!["https://toggle.example"]);

		toggle.set_horizon_urls(["https://new-uri.example"]);
		assert_eq!(toggle.horizon_urls(), vec!["https://new-uri.example"]);
	}

	#[test]
	fn build_rejects_key_without_prefix() {
		let result = Toggle::new(ToggleOptions::new().with_public_api_key("no-prefix"));
		assert!(matches!(result, Err(ToggleError::InvalidPublicApiKey(_))));
	}

	#[test]
	fn setter_rejects_key_without_prefix_and_keeps_state() {
		let toggle = Toggle::new(ToggleOptions::new().with_public_api_key(acme_key())).unwrap();
		let result = toggle.set_public_api_key("no-prefix");
		assert!(matches!(result, Err(ToggleError::InvalidPublicApiKey(_))));
		assert_eq!(toggle.public_api_key(), Some(acme_key()));
		assert_eq!(toggle.organization_id().as_deref(), Some("acme"));
	}

	#[test]
	fn setter_recomputes_organization_and_derived_urls() {
		let toggle = Toggle::new(ToggleOptions::new().with_public_api_key(acme_key())).unwrap();

		toggle.set_public_api_key("public_x").unwrap();
		assert_eq!(toggle.public_api_key().as_deref(), Some("public_x"));
		assert!(toggle.organization_id().is_none());
		assert_eq!(toggle.horizon_urls(), vec![FALLBACK_HORIZON_URL]);

		let other = format!("public_{}", STANDARD.encode("other-org:secret"));
		toggle.set_public_api_key(other).unwrap();
		assert_eq!(toggle.organization_id().as_deref(), Some("other-org"));
		assert_eq!(toggle.horizon_urls()[0], "https://other-org.toggle.hyphen.cloud");

		toggle.clear_public_api_key();
		assert!(toggle.public_api_key().is_none());
		assert!(toggle.organization_id().is_none());
	}

	#[test]
	fn setter_keeps_explicit_urls() {
		let options = ToggleOptions::new().with_horizon_urls(["https://toggle.example"]);
		let toggle = Toggle::new(options).unwrap();
		toggle.set_public_api_key(acme_key()).unwrap();
		assert_eq!(toggle.organization_id().as_deref(), Some("acme"));
		assert_eq!(toggle.horizon_urls(), vec!["https://toggle.example"]);
	}

	#[test]
	fn setters_update_state() {
		let toggle = Toggle::new(
			ToggleOptions::new()
				.with_application_id("my-app")
				.with_environment("development"),
		)
		.unwrap();

		toggle.set_application_id(Some("new-app".to_string()));
		toggle.set_environment("production");
		toggle.set_default_targeting_key("key-1");
		toggle.set_default_context(Some(ToggleContext::new().with_ip_address("10.0.0.1")));
		toggle.set_caching(Some(CachingOptions::new(Duration::from_secs(120))));

		assert_eq!(toggle.application_id().as_deref(), Some("new-app"));
		assert_eq!(toggle.environment(), "production");
		assert_eq!(toggle.default_targeting_key(), "key-1");
		assert_eq!(
			toggle.default_context().unwrap().ip_address.as_deref(),
			Some("10.0.0.1")
		);
		assert_eq!(toggle.caching().unwrap().ttl, Duration::from_secs(120));

		toggle.set_caching(None);
		assert!(toggle.caching().is_none());
	}

	#[test]
	fn targeting_key_uses_context_chain() {
		let toggle = Toggle::builder().default_target_key("fallback-key").build().unwrap();
		assert_eq!(
			toggle.targeting_key(&ToggleContext::new().with_user(ToggleUser::new("user-123"))),
			"user-123"
		);
		assert_eq!(toggle.targeting_key(&ToggleContext::new()), "fallback-key");
	}

	#[tokio::test]
	async fn get_without_public_key_returns_default_without_network() {
		let transport = CountingTransport::default();
		let toggle = Toggle::builder()
			.application_id("test-app")
			.default_context(ToggleContext::new().with_targeting_key("test"))
			.transport(transport.clone())
			.build()
			.unwrap();

		let errors = Arc::new(AtomicUsize::new(0));
		let seen = errors.clone();
		toggle.on_error(move |err| {
			assert!(matches!(err, ToggleError::MissingPublicApiKey));
			seen.fetch_add(1, Ordering::SeqCst);
		});

		let value = toggle
			.get_string("test-toggle", "default-value", GetOptions::default())
			.await;
		assert_eq!(value, "default-value");
		assert_eq!(errors.load(Ordering::SeqCst), 1);
		assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn get_without_application_returns_default() {
		let transport = CountingTransport::default();
		let toggle = Toggle::builder()
			.public_api_key("public_test-key")
			.application_id("")
			.transport(transport.clone())
			.build()
			.unwrap();

		let value = toggle
			.get("test-toggle", json!("validation-failed"), GetOptions::default())
			.await;
		assert_eq!(value, json!("validation-failed"));
		assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn unconfigured_client_fails_closed() {
		let toggle = Toggle::builder()
			.transport(CountingTransport::default())
			.build()
			.unwrap();
		assert!(!toggle.get_boolean("flag", false, GetOptions::default()).await);
	}

	#[tokio::test]
	async fn fetch_with_empty_urls_fails_before_network() {
		let transport = CountingTransport::default();
		let toggle = Toggle::builder()
			.horizon_urls(Vec::<String>::new())
			.transport(transport.clone())
			.build()
			.unwrap();

		let err = toggle
			.fetch::<Value>("/api/test", None, FetchOptions::default())
			.await
			.unwrap_err();
		assert_eq!(
			err.to_string(),
			"No horizon URLs configured. Set horizonUrls or provide a valid publicApiKey."
		);
		assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn hooks_may_reenter_the_client() {
		let toggle = Toggle::builder()
			.transport(CountingTransport::default())
			.build()
			.unwrap();

		let inner = toggle.clone();
		toggle.on_before_get(move |_| {
			inner.set_environment("from-hook");
		});

		let _ = toggle.get_boolean("flag", false, GetOptions::default()).await;
		assert_eq!(toggle.environment(), "from-hook");
	}

	#[test]
	fn number_getter_falls_back_on_transport_failure() {
		let transport = CountingTransport::default();
		let toggle = Toggle::builder()
			.public_api_key("public_key")
			.application_id("app")
			.horizon_urls(["https://a.example", "https://b.example"])
			.transport(transport.clone())
			.build()
			.unwrap();

		let value = tokio_test::block_on(toggle.get_number("limit", 42.0, GetOptions::default()));
		assert_eq!(value, 42.0);
		assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn coerce_parses_json_strings() {
		#[derive(Debug, PartialEq, Deserialize)]
		struct Payload {
			id: String,
		}

		let value = json!("{ \"id\": \"Hello World!\"}");
		let parsed: Payload = coerce("json", &value).unwrap();
		assert_eq!(
			parsed,
			Payload {
				id: "Hello World!".to_string()
			}
		);

		let raw: String = coerce("json", &value).unwrap();
		assert_eq!(raw, "{ \"id\": \"Hello World!\"}");
	}

	#[test]
	fn coerce_reports_type_mismatch() {
		let result: Result<bool> = coerce("flag", &json!("not-a-bool"));
		assert!(matches!(result, Err(ToggleError::TypeMismatch { .. })));
	}
}
