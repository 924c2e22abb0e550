// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Readers for `HYPHEN_*` environment variables.

pub const HYPHEN_PUBLIC_API_KEY: &str = "HYPHEN_PUBLIC_API_KEY";
pub const HYPHEN_APPLICATION_ID: &str = "HYPHEN_APPLICATION_ID";
pub const HYPHEN_ENVIRONMENT: &str = "HYPHEN_ENVIRONMENT";
/// Comma-separated list of horizon URLs.
pub const HYPHEN_HORIZON_URLS: &str = "HYPHEN_HORIZON_URLS";
pub const HYPHEN_DEFAULT_TARGET_KEY: &str = "HYPHEN_DEFAULT_TARGET_KEY";

/// Reads a variable, treating unset, non-unicode, and blank values as absent.
pub fn var(name: &str) -> Option<String> {
	std::env::var(name)
		.ok()
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

/// Reads a comma-separated variable into its non-blank entries.
pub fn list_var(name: &str) -> Option<Vec<String>> {
	let raw = var(name)?;
	let items: Vec<String> = raw
		.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(String::from)
		.collect();

	if items.is_empty() {
		None
	} else {
		Some(items)
	}
}
