// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Case-insensitive alias sets.

use std::collections::HashSet;

/// Ordered collection of alternative names for a language.
///
/// Membership is case-insensitive: `"Deutsch"`, `"deutsch"` and `"DEUTSCH"`
/// are the same alias. The first spelling inserted is the one kept for
/// iteration.
#[derive(Debug, Clone, Default)]
pub struct AliasSet {
	spellings: Vec<String>,
	folded: HashSet<String>,
}

fn fold(alias: &str) -> String {
	alias.to_lowercase()
}

impl AliasSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert an alias. Returns `false` if an alias with the same case-folded
	/// form is already present.
	pub fn add(&mut self, alias: impl Into<String>) -> bool {
		let alias = alias.into();
		if !self.folded.insert(fold(&alias)) {
			return false;
		}
		self.spellings.push(alias);
		true
	}

	/// Insert every alias. Returns `true` if at least one was new.
	pub fn add_all<I, S>(&mut self, aliases: I) -> bool
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		aliases
			.into_iter()
			.fold(false, |changed, alias| self.add(alias) || changed)
	}

	/// Like [`AliasSet::add_all`], but a missing collection is a no-op that
	/// reports failure.
	pub fn add_all_opt<I, S>(&mut self, aliases: Option<I>) -> bool
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		match aliases {
			Some(aliases) => self.add_all(aliases),
			None => false,
		}
	}

	pub fn contains(&self, candidate: &str) -> bool {
		self.folded.contains(&fold(candidate))
	}

	/// Aliases in insertion order, as first spelled.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.spellings.iter().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.spellings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.spellings.is_empty()
	}
}
