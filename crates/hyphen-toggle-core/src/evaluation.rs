// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wire payload and response types for `toggle/evaluate`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ToggleContext;

/// Request body posted to the evaluation service.
///
/// Built fresh for every call; the context fields are flattened into the
/// top-level object next to `application` and `environment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleEvaluation {
	pub application: String,
	pub environment: String,
	#[serde(flatten)]
	pub context: ToggleContext,
}

/// Declared type of a toggle value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleType {
	Boolean,
	String,
	Number,
	Object,
	#[default]
	#[serde(other)]
	Unknown,
}

/// A single toggle evaluation returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
	#[serde(default)]
	pub key: String,
	#[serde(default)]
	pub value: Value,
	#[serde(rename = "type", default)]
	pub toggle_type: ToggleType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_message: Option<String>,
}

/// Response body of `toggle/evaluate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
	#[serde(default)]
	pub toggles: HashMap<String, Evaluation>,
}

impl EvaluationResponse {
	pub fn get(&self, key: &str) -> Option<&Evaluation> {
		self.toggles.get(key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::ToggleUser;
	use serde_json::json;

	#[test]
	fn evaluation_payload_flattens_context() {
		let payload = ToggleEvaluation {
			application: "my-app".to_string(),
			environment: "production".to_string(),
			context: ToggleContext::new()
				.with_targeting_key("user-123")
				.with_user(ToggleUser::new("user-123")),
		};

		let json = serde_json::to_value(&payload).unwrap();
		assert_eq!(
			json,
			json!({
				"application": "my-app",
				"environment": "production",
				"targetingKey": "user-123",
				"user": { "id": "user-123" }
			})
		);
	}

	#[test]
	fn parses_service_response() {
		let body = json!({
			"toggles": {
				"hyphen-sdk-boolean": {
					"key": "hyphen-sdk-boolean",
					"value": true,
					"type": "boolean",
					"reason": "default"
				},
				"hyphen-sdk-json": {
					"key": "hyphen-sdk-json",
					"value": "{ \"id\": \"Hello World!\"}",
					"type": "object",
					"errorMessage": "none"
				}
			}
		});

		let response: EvaluationResponse = serde_json::from_value(body).unwrap();
		let boolean = response.get("hyphen-sdk-boolean").unwrap();
		assert_eq!(boolean.value, json!(true));
		assert_eq!(boolean.toggle_type, ToggleType::Boolean);
		assert_eq!(boolean.reason.as_deref(), Some("default"));

		let object = response.get("hyphen-sdk-json").unwrap();
		assert_eq!(object.toggle_type, ToggleType::Object);
		assert_eq!(object.error_message.as_deref(), Some("none"));
		assert!(response.get("missing").is_none());
	}

	#[test]
	fn unknown_toggle_type_is_tolerated() {
		let evaluation: Evaluation =
			serde_json::from_value(json!({ "key": "k", "value": 1, "type": "json" })).unwrap();
		assert_eq!(evaluation.toggle_type, ToggleType::Unknown);
	}

	#[test]
	fn empty_response_has_no_toggles() {
		let response: EvaluationResponse = serde_json::from_value(json!({})).unwrap();
		assert!(response.toggles.is_empty());
	}
}
