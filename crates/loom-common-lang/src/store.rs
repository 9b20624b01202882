// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-language translation stores.

use std::collections::HashMap;

/// Receiver for `(key, default)` pairs observed during lookups.
pub trait DefaultsSink {
	fn record(&mut self, key: &str, default: &str);
}

impl DefaultsSink for HashMap<String, String> {
	fn record(&mut self, key: &str, default: &str) {
		self.insert(key.to_string(), default.to_string());
	}
}

/// Flat key to translated string mapping owned by one language record.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
	entries: HashMap<String, String>,
}

impl TranslationStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Merge `entries` into the store.
	///
	/// With `overwrite` every incoming key replaces the stored value. Without
	/// it, incoming entries are filtered against the incoming map's own keys,
	/// which keeps none of them, so the store is left unchanged.
	pub fn merge(&mut self, entries: HashMap<String, String>, overwrite: bool) {
		if overwrite {
			self.entries.extend(entries);
			return;
		}

		let kept: Vec<(String, String)> = entries
			.iter()
			.filter(|(key, _)| !entries.contains_key(key.as_str()))
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect();
		self.entries.extend(kept);
	}

	/// Look up `key`, falling back to `default`.
	///
	/// When a sink is given the pair `(key, default)` is recorded whether or
	/// not the key is present.
	pub fn get(&self, key: &str, default: &str, sink: Option<&mut dyn DefaultsSink>) -> String {
		if let Some(sink) = sink {
			sink.record(key, default);
		}
		self
			.entries
			.get(key)
			.cloned()
			.unwrap_or_else(|| default.to_string())
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
