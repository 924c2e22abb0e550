// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory TTL store for evaluation responses.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use hyphen_toggle_core::{EvaluationResponse, ToggleEvaluation};
use parking_lot::Mutex;

/// Derives the cache key for an evaluation payload.
pub type CacheKeyFn = Arc<dyn Fn(&ToggleEvaluation) -> String + Send + Sync>;

/// Response caching configuration.
#[derive(Clone)]
pub struct CachingOptions {
	/// How long a response stays valid.
	pub ttl: Duration,
	/// Custom key function. Defaults to the serialized payload.
	pub cache_key: Option<CacheKeyFn>,
}

impl CachingOptions {
	pub fn new(ttl: Duration) -> Self {
		Self {
			ttl,
			cache_key: None,
		}
	}

	pub fn with_cache_key<F>(mut self, f: F) -> Self
	where
		F: Fn(&ToggleEvaluation) -> String + Send + Sync + 'static,
	{
		self.cache_key = Some(Arc::new(f));
		self
	}
}

impl fmt::Debug for CachingOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CachingOptions")
			.field("ttl", &self.ttl)
			.field("cache_key", &self.cache_key.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

struct CacheEntry {
	expires_at: Instant,
	response: EvaluationResponse,
}

/// Shared response cache, keyed per evaluation payload.
pub(crate) struct ResponseCache {
	options: CachingOptions,
	entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
	pub(crate) fn new(options: CachingOptions) -> Self {
		Self {
			options,
			entries: Mutex::new(HashMap::new()),
		}
	}

	pub(crate) fn options(&self) -> &CachingOptions {
		&self.options
	}

	pub(crate) fn key_for(&self, evaluation: &ToggleEvaluation) -> String {
		match &self.options.cache_key {
			Some(f) => f(evaluation),
			None => serde_json::to_string(evaluation).unwrap_or_default(),
		}
	}

	pub(crate) fn get(&self, key: &str) -> Option<EvaluationResponse> {
		let mut entries = self.entries.lock();
		match entries.get(key) {
			Some(entry) if Instant::now() < entry.expires_at => Some(entry.response.clone()),
			Some(_) => {
				entries.remove(key);
				None
			}
			None => None,
		}
	}

	pub(crate) fn insert(&self, key: String, response: EvaluationResponse) {
		let now = Instant::now();
		let mut entries = self.entries.lock();
		entries.retain(|_, entry| now < entry.expires_at);
		entries.insert(
			key,
			CacheEntry {
				expires_at: now + self.options.ttl,
				response,
			},
		);
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.lock().len()
	}
}

impl fmt::Debug for ResponseCache {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResponseCache")
			.field("options", &self.options)
			.field("entries", &self.len())
			.finish()
	}
}
