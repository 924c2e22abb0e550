// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Builds the evaluation payload for one call.

use std::sync::Arc;

use hyphen_toggle_core::{resolve_targeting_key, ToggleContext, ToggleEvaluation};

use crate::cache::ResponseCache;
use crate::error::{Result, ToggleError};

/// Client configuration captured atomically at the start of a call.
///
/// Setters called while a request is in flight affect only later calls.
#[derive(Debug, Clone)]
pub(crate) struct ConfigSnapshot {
	pub public_api_key: Option<String>,
	pub application_id: Option<String>,
	pub environment: String,
	pub default_context: Option<ToggleContext>,
	pub default_targeting_key: String,
	pub horizon_urls: Vec<String>,
	pub cache: Option<Arc<ResponseCache>>,
}

/// Builds the request payload from the snapshot and an optional per-call context.
///
/// A per-call context replaces the default context as a whole; fields are
/// never merged between the two. The targeting key is filled in afterwards
/// when still unset.
pub(crate) fn build_evaluation(
	snapshot: &ConfigSnapshot,
	context: Option<&ToggleContext>,
) -> Result<ToggleEvaluation> {
	if snapshot.public_api_key.is_none() {
		return Err(ToggleError::MissingPublicApiKey);
	}

	let application = match snapshot.application_id.as_deref() {
		Some(id) if !id.is_empty() => id.to_string(),
		_ => return Err(ToggleError::MissingApplicationId),
	};

	let mut context = context
		.or(snapshot.default_context.as_ref())
		.cloned()
		.unwrap_or_default();

	if context.targeting_key.is_none() {
		context.targeting_key = Some(resolve_targeting_key(
			&context,
			&snapshot.default_targeting_key,
		));
	}

	Ok(ToggleEvaluation {
		application,
		environment: snapshot.environment.clone(),
		context,
	})
}
