// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Public API key handling.
//!
//! A public key has the form `public_<base64(orgId:secret)>`. Only the
//! organization id is ever read out of it; the secret is passed through
//! untouched as the `x-api-key` credential.

use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine;

use crate::error::{Result, ToggleCoreError};

/// Prefix every public API key carries.
pub const PUBLIC_KEY_PREFIX: &str = "public_";

const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
	&alphabet::STANDARD,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Extracts the organization id from a public API key.
///
/// The `public_` prefix is optional. Returns `None` when the payload is not
/// valid base64, not UTF-8, or when the first `:`-delimited segment is empty
/// or contains characters outside `[A-Za-z0-9_-]`.
pub fn org_id_from_public_key(key: &str) -> Option<String> {
	let payload = key.strip_prefix(PUBLIC_KEY_PREFIX).unwrap_or(key);
	let decoded = KEY_ENGINE.decode(payload).ok()?;
	let decoded = String::from_utf8(decoded).ok()?;

	let org_id = decoded.split(':').next()?;
	if is_valid_org_id(org_id) {
		Some(org_id.to_string())
	} else {
		None
	}
}

/// Checks that a key is a public key before it is stored.
pub fn validate_public_api_key(key: &str) -> Result<()> {
	if key.starts_with(PUBLIC_KEY_PREFIX) {
		Ok(())
	} else {
		Err(ToggleCoreError::InvalidPublicApiKey)
	}
}

fn is_valid_org_id(org_id: &str) -> bool {
	!org_id.is_empty()
		&& org_id
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
	use super::*;
	use base64::engine::general_purpose::STANDARD;
	use proptest::prelude::*;

	fn public_key(raw: &str) -> String {
		format!("{PUBLIC_KEY_PREFIX}{}", STANDARD.encode(raw))
	}

	#[test]
	fn extracts_org_id_from_valid_key() {
		assert_eq!(
			org_id_from_public_key(&public_key("test-org:some-secret")),
			Some("test-org".to_string())
		);
	}

	#[test]
	fn prefix_is_optional() {
		let key = STANDARD.encode("org-without-prefix:secret-data");
		assert_eq!(
			org_id_from_public_key(&key),
			Some("org-without-prefix".to_string())
		);
	}

	#[test]
	fn malformed_base64_yields_none() {
		assert_eq!(org_id_from_public_key("public_invalid-base64!"), None);
		assert_eq!(org_id_from_public_key("public_my-public-key"), None);
	}

	#[test]
	fn empty_payload_yields_none() {
		assert_eq!(org_id_from_public_key(&public_key("")), None);
		assert_eq!(org_id_from_public_key("public_"), None);
		assert_eq!(org_id_from_public_key(""), None);
	}

	#[test]
	fn payload_without_colon_is_whole_candidate() {
		assert_eq!(
			org_id_from_public_key(&public_key("orgidwithoutcolon")),
			Some("orgidwithoutcolon".to_string())
		);
	}

	#[test]
	fn multiple_colons_use_first_segment() {
		assert_eq!(
			org_id_from_public_key(&public_key("multi-colon-org:secret:extra:data")),
			Some("multi-colon-org".to_string())
		);
	}

	#[test]
	fn empty_org_id_yields_none() {
		assert_eq!(org_id_from_public_key(&public_key(":secret-data")), None);
	}

	#[test]
	fn invalid_characters_yield_none() {
		assert_eq!(org_id_from_public_key(&public_key("org@invalid#chars:data")), None);
		assert_eq!(org_id_from_public_key(&public_key("org with spaces:data")), None);
	}

	#[test]
	fn unpadded_payload_is_accepted() {
		let key = format!(
			"{PUBLIC_KEY_PREFIX}{}",
			STANDARD.encode("ab:data").trim_end_matches('=')
		);
		assert_eq!(org_id_from_public_key(&key), Some("ab".to_string()));
	}

	#[test]
	fn validate_requires_prefix() {
		assert!(validate_public_api_key("public_x").is_ok());
		assert_eq!(
			validate_public_api_key("no-prefix"),
			Err(ToggleCoreError::InvalidPublicApiKey)
		);
	}

	proptest! {
		#[test]
		fn valid_org_id_roundtrips(
			org_id in "[A-Za-z0-9_-]{1,100}",
			secret in "[A-Za-z0-9:]{0,40}",
		) {
			let key = public_key(&format!("{org_id}:{secret}"));
			prop_assert_eq!(org_id_from_public_key(&key), Some(org_id));
		}

		#[test]
		fn org_id_with_invalid_char_is_rejected(
			prefix in "[a-z]{0,10}",
			bad in "[@#. !/]",
			suffix in "[a-z]{0,10}",
		) {
			let key = public_key(&format!("{prefix}{bad}{suffix}:secret"));
			prop_assert_eq!(org_id_from_public_key(&key), None);
		}
	}
}
