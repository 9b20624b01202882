// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language records and identity matching.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use unic_langid::LanguageIdentifier;

use crate::alias::AliasSet;
use crate::locale::posix_form;
use crate::store::{DefaultsSink, TranslationStore};

/// Value a [`LanguageRecord`] can be matched against.
#[derive(Debug, Clone, Copy)]
pub enum MatchTarget<'a> {
	Record(&'a LanguageRecord),
	Text(&'a str),
	Locale(&'a LanguageIdentifier),
}

impl<'a> From<&'a LanguageRecord> for MatchTarget<'a> {
	fn from(record: &'a LanguageRecord) -> Self {
		Self::Record(record)
	}
}

impl<'a> From<&'a str> for MatchTarget<'a> {
	fn from(text: &'a str) -> Self {
		Self::Text(text)
	}
}

impl<'a> From<&'a LanguageIdentifier> for MatchTarget<'a> {
	fn from(locale: &'a LanguageIdentifier) -> Self {
		Self::Locale(locale)
	}
}

/// Canonical identity of one language, plus its translations.
///
/// Codes and names are fixed at construction. Locales are attached while the
/// catalog is built; aliases and translations can change afterwards.
#[derive(Debug)]
pub struct LanguageRecord {
	alpha3_b: Option<String>,
	alpha3_t: Option<String>,
	alpha2: Option<String>,
	english: Option<String>,
	french: Option<String>,
	german: Option<String>,
	locales: Vec<LanguageIdentifier>,
	aliases: RwLock<AliasSet>,
	store: RwLock<TranslationStore>,
}

fn present(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}

impl LanguageRecord {
	/// Build a record from its positional catalog fields. Empty strings are
	/// stored as absent.
	pub fn new(
		alpha3_b: Option<String>,
		alpha3_t: Option<String>,
		alpha2: Option<String>,
		english: Option<String>,
		french: Option<String>,
		german: Option<String>,
	) -> Self {
		Self {
			alpha3_b: present(alpha3_b),
			alpha3_t: present(alpha3_t),
			alpha2: present(alpha2),
			english: present(english),
			french: present(french),
			german: present(german),
			locales: Vec::new(),
			aliases: RwLock::new(AliasSet::new()),
			store: RwLock::new(TranslationStore::new()),
		}
	}

	pub fn alpha3_bibliographic(&self) -> Option<&str> {
		self.alpha3_b.as_deref()
	}

	pub fn alpha3_terminologic(&self) -> Option<&str> {
		self.alpha3_t.as_deref()
	}

	pub fn alpha2(&self) -> Option<&str> {
		self.alpha2.as_deref()
	}

	pub fn english_name(&self) -> Option<&str> {
		self.english.as_deref()
	}

	pub fn french_name(&self) -> Option<&str> {
		self.french.as_deref()
	}

	pub fn german_name(&self) -> Option<&str> {
		self.german.as_deref()
	}

	pub fn locales(&self) -> &[LanguageIdentifier] {
		&self.locales
	}

	/// Append a locale. Only possible while the record is exclusively owned,
	/// i.e. before it is published in a catalog.
	pub fn attach_locale(&mut self, locale: LanguageIdentifier) {
		self.locales.push(locale);
	}

	pub fn aliases(&self) -> RwLockReadGuard<'_, AliasSet> {
		self.aliases.read().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn add_alias(&self, alias: impl Into<String>) -> bool {
		self
			.aliases
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.add(alias)
	}

	pub fn add_aliases<I, S>(&self, aliases: I) -> bool
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self
			.aliases
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.add_all(aliases)
	}

	/// Read access to the translation store.
	pub fn store(&self) -> RwLockReadGuard<'_, TranslationStore> {
		self.store.read().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn merge_translations(&self, entries: HashMap<String, String>, overwrite: bool) {
		self
			.store
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.merge(entries, overwrite);
	}

	pub fn clear_translations(&self) {
		self
			.store
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.clear();
	}

	/// Translated string for `key`, or `default`.
	pub fn get(&self, key: &str, default: &str, sink: Option<&mut dyn DefaultsSink>) -> String {
		self.store().get(key, default, sink)
	}

	pub fn matches<'a>(&self, target: impl Into<MatchTarget<'a>>) -> bool {
		match target.into() {
			MatchTarget::Record(other) => self.matches_record(other),
			MatchTarget::Text(text) => self.matches_text(text),
			MatchTarget::Locale(locale) => self.matches_locale(locale),
		}
	}

	/// When both records carry a bibliographic code, the codes decide.
	/// Otherwise the locale lists must be equal element for element.
	///
	/// Two records without a bibliographic code and without locales are
	/// therefore equal.
	pub fn matches_record(&self, other: &LanguageRecord) -> bool {
		if std::ptr::eq(self, other) {
			return true;
		}
		match (&self.alpha3_b, &other.alpha3_b) {
			(Some(a), Some(b)) => a == b,
			_ => self.locales == other.locales,
		}
	}

	/// Case-insensitive match against codes, names, aliases and locale strings.
	pub fn matches_text(&self, text: &str) -> bool {
		if text.is_empty() {
			return false;
		}
		let folded = text.to_lowercase();

		let field_match = [
			&self.alpha2,
			&self.alpha3_b,
			&self.alpha3_t,
			&self.english,
			&self.french,
			&self.german,
		]
		.into_iter()
		.flatten()
		.any(|field| field.to_lowercase() == folded);

		field_match
			|| self.aliases().contains(text)
			|| self.locales.iter().any(|locale| {
				locale.to_string().to_lowercase() == folded
					|| posix_form(locale).to_lowercase() == folded
			})
	}

	pub fn matches_locale(&self, locale: &LanguageIdentifier) -> bool {
		self.locales.contains(locale)
	}
}

impl fmt::Display for LanguageRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = self.english.as_deref().unwrap_or("unnamed");
		match self.alpha2.as_deref().or(self.alpha3_b.as_deref()) {
			Some(code) => write!(f, "{name} ({code})"),
			None => write!(f, "{name}"),
		}
	}
}
