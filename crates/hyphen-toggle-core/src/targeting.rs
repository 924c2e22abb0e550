// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Targeting key resolution.
//!
//! The targeting key is the identity the service buckets on. A client
//! establishes a default targeting key once, at construction, and every
//! evaluation falls back to it when the context carries no identity of its
//! own.

use crate::context::ToggleContext;

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 7;

/// Source of the random suffix appended to generated targeting keys.
pub trait KeySuffixGenerator: Send + Sync + 'static {
	fn suffix(&self) -> String;
}

impl<F> KeySuffixGenerator for F
where
	F: Fn() -> String + Send + Sync + 'static,
{
	fn suffix(&self) -> String {
		self()
	}
}

/// Non-cryptographic suffix generator backed by `fastrand`.
///
/// Produces seven characters of `[a-z0-9]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastrandSuffix;

impl KeySuffixGenerator for FastrandSuffix {
	fn suffix(&self) -> String {
		(0..SUFFIX_LEN)
			.map(|_| SUFFIX_ALPHABET[fastrand::usize(..SUFFIX_ALPHABET.len())] as char)
			.collect()
	}
}

/// Joins the non-empty parts of `[application_id, environment, suffix]` with `-`.
pub fn generate_target_key(
	application_id: Option<&str>,
	environment: Option<&str>,
	generator: &dyn KeySuffixGenerator,
) -> String {
	let suffix = generator.suffix();
	[application_id.unwrap_or(""), environment.unwrap_or(""), suffix.as_str()]
		.into_iter()
		.filter(|part| !part.is_empty())
		.collect::<Vec<_>>()
		.join("-")
}

/// Establishes the client's default targeting key.
///
/// Precedence: explicit `default_target_key`, the default context's
/// targeting key, the default context's user id, then a generated key.
pub fn default_targeting_key(
	default_target_key: Option<&str>,
	default_context: Option<&ToggleContext>,
	application_id: Option<&str>,
	environment: Option<&str>,
	generator: &dyn KeySuffixGenerator,
) -> String {
	if let Some(key) = default_target_key {
		return key.to_string();
	}

	if let Some(ctx) = default_context {
		if let Some(key) = &ctx.targeting_key {
			return key.clone();
		}
		if let Some(user) = &ctx.user {
			return user.id.clone();
		}
	}

	generate_target_key(application_id, environment, generator)
}

/// Resolves the targeting key for one evaluation.
///
/// Never generates a new key; `default_key` is the already-established
/// default of the client.
pub fn resolve_targeting_key(context: &ToggleContext, default_key: &str) -> String {
	context
		.targeting_key
		.clone()
		.or_else(|| context.user.as_ref().map(|user| user.id.clone()))
		.unwrap_or_else(|| default_key.to_string())
}
