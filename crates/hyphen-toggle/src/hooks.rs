// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interception points around toggle evaluation.
//!
//! Hooks run inline, in registration order, strictly before or after the
//! network call. Each hook gets mutable access to the call's data:
//!
//! | Point | Data | Typical use |
//! |-------|------|-------------|
//! | `beforeGet` | [`GetData`] | rewrite the key, default, or per-call context |
//! | `afterGet` | [`GetResultData`] | override or record the evaluated value |
//!
//! # Example
//!
//! ```ignore
//! toggle.on_before_get(|data| {
//!     data.options.context.get_or_insert_with(Default::default).ip_address =
//!         Some("203.0.113.42".to_string());
//! });
//!
//! toggle.on_after_get(|data| {
//!     tracing::info!(key = %data.key, value = %data.result, "Toggle evaluated");
//! });
//! ```

use std::fmt;
use std::sync::Arc;

use hyphen_toggle_core::{Evaluation, ToggleContext};
use serde_json::Value;

/// Named extension points of the getter pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
	BeforeGet,
	AfterGet,
}

impl HookPoint {
	pub fn as_str(&self) -> &'static str {
		match self {
			HookPoint::BeforeGet => "beforeGet",
			HookPoint::AfterGet => "afterGet",
		}
	}
}

impl fmt::Display for HookPoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Per-call options for the typed getters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
	/// Replaces the client's default context entirely for this call.
	pub context: Option<ToggleContext>,
}

impl GetOptions {
	pub fn with_context(context: ToggleContext) -> Self {
		Self {
			context: Some(context),
		}
	}
}

/// Data handed to `beforeGet` hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct GetData {
	pub key: String,
	pub default_value: Value,
	pub options: GetOptions,
}

/// Data handed to `afterGet` hooks.
#[derive(Debug, Clone, PartialEq)]
pub struct GetResultData {
	pub key: String,
	pub default_value: Value,
	pub options: GetOptions,
	/// The value returned to the caller once all hooks have run.
	pub result: Value,
	/// The evaluation as received from the service.
	pub evaluation: Evaluation,
}

pub type BeforeGetHook = Arc<dyn Fn(&mut GetData) + Send + Sync>;
pub type AfterGetHook = Arc<dyn Fn(&mut GetResultData) + Send + Sync>;

/// Registered hooks, in registration order.
#[derive(Clone, Default)]
pub(crate) struct Hooks {
	before_get: Vec<BeforeGetHook>,
	after_get: Vec<AfterGetHook>,
}

impl Hooks {
	pub(crate) fn add_before_get(&mut self, hook: BeforeGetHook) {
		self.before_get.push(hook);
	}

	pub(crate) fn add_after_get(&mut self, hook: AfterGetHook) {
		self.after_get.push(hook);
	}

	pub(crate) fn clear(&mut self, point: HookPoint) {
		match point {
			HookPoint::BeforeGet => self.before_get.clear(),
			HookPoint::AfterGet => self.after_get.clear(),
		}
	}

	pub(crate) fn count(&self, point: HookPoint) -> usize {
		match point {
			HookPoint::BeforeGet => self.before_get.len(),
			HookPoint::AfterGet => self.after_get.len(),
		}
	}

	pub(crate) fn run_before_get(&self, data: &mut GetData) {
		for hook in &self.before_get {
			hook(data);
		}
	}

	pub(crate) fn run_after_get(&self, data: &mut GetResultData) {
		for hook in &self.after_get {
			hook(data);
		}
	}
}

impl fmt::Debug for Hooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Hooks")
			.field("before_get", &self.before_get.len())
			.field("after_get", &self.after_get.len())
			.finish()
	}
}
