// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised by the pure toggle types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToggleCoreError {
	/// The key does not carry the `public_` prefix.
	#[error(
		"invalid public API key: must start with '{prefix}'",
		prefix = crate::PUBLIC_KEY_PREFIX
	)]
	InvalidPublicApiKey,
}

pub type Result<T> = std::result::Result<T, ToggleCoreError>;
