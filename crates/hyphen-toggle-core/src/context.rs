// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Evaluation context attached to toggle requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The user a toggle is being evaluated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleUser {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_attributes: Option<Map<String, Value>>,
}

impl ToggleUser {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			email: None,
			name: None,
			custom_attributes: None,
		}
	}

	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
		self
			.custom_attributes
			.get_or_insert_with(Map::new)
			.insert(key.into(), value);
		self
	}
}

/// Attributes sent with an evaluation request to personalize the result.
///
/// Every field is optional. When the targeting key is absent the client fills
/// it in from the user id or its own default targeting key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleContext {
	/// Primary identity used by the service for consistent bucketing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub targeting_key: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip_address: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user: Option<ToggleUser>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_attributes: Option<Map<String, Value>>,
}

impl ToggleContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_targeting_key(mut self, key: impl Into<String>) -> Self {
		self.targeting_key = Some(key.into());
		self
	}

	pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
		self.ip_address = Some(ip.into());
		self
	}

	pub fn with_user(mut self, user: ToggleUser) -> Self {
		self.user = Some(user);
		self
	}

	pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
		self
			.custom_attributes
			.get_or_insert_with(Map::new)
			.insert(key.into(), value);
		self
	}
}
