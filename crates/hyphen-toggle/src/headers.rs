// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caller-supplied request headers.
//!
//! Callers may pass headers as a map, as a list of pairs, or as a
//! `reqwest::header::HeaderMap`. [`normalize_headers`] turns any of them into
//! one ordered list before the client adds its own headers on top.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;

/// Headers in the shapes callers may supply.
#[derive(Debug, Clone)]
pub enum HeaderInput {
	Map(BTreeMap<String, String>),
	Pairs(Vec<(String, String)>),
	Headers(HeaderMap),
}

impl From<BTreeMap<String, String>> for HeaderInput {
	fn from(map: BTreeMap<String, String>) -> Self {
		HeaderInput::Map(map)
	}
}

impl From<Vec<(String, String)>> for HeaderInput {
	fn from(pairs: Vec<(String, String)>) -> Self {
		HeaderInput::Pairs(pairs)
	}
}

impl From<HeaderMap> for HeaderInput {
	fn from(headers: HeaderMap) -> Self {
		HeaderInput::Headers(headers)
	}
}

/// An ordered header list. Names keep the case they were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedHeaders {
	entries: Vec<(String, String)>,
}

impl NormalizedHeaders {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `name`, replacing an entry with exactly the same name in place.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	/// Sets `name`, removing every entry whose name matches ignoring case.
	pub fn insert_overriding(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		self
			.entries
			.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
		self.entries.push((name, value.into()));
	}

	pub fn contains_ignore_case(&self, name: &str) -> bool {
		self
			.entries
			.iter()
			.any(|(existing, _)| existing.eq_ignore_ascii_case(name))
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self
			.entries
			.iter()
			.rev()
			.find(|(existing, _)| existing.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self
			.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Normalizes any supported header shape into a [`NormalizedHeaders`].
///
/// Values of a `HeaderMap` that are not visible ASCII are skipped.
pub fn normalize_headers(input: &HeaderInput) -> NormalizedHeaders {
	let mut headers = NormalizedHeaders::new();
	match input {
		HeaderInput::Map(map) => {
			for (name, value) in map {
				headers.insert(name.as_str(), value.as_str());
			}
		}
		HeaderInput::Pairs(pairs) => {
			for (name, value) in pairs {
				headers.insert(name.as_str(), value.as_str());
			}
		}
		HeaderInput::Headers(map) => {
			for (name, value) in map {
				if let Ok(value) = value.to_str() {
					headers.insert(name.as_str(), value);
				}
			}
		}
	}
	headers
}
