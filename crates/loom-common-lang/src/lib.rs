// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language identity resolution and translated strings for Loom.
//!
//! This crate resolves loose language input (ISO 639 codes, English, French
//! or German names, user-defined aliases, locale tags) to a canonical
//! [`LanguageRecord`], and serves translated strings from that record's
//! [`TranslationStore`].
//!
//! # Example
//!
//! ```
//! use loom_common_lang::{LanguageConfig, LanguageRegistry};
//!
//! let registry = LanguageRegistry::bootstrap(LanguageConfig::default()).unwrap();
//!
//! // "EN" is active after bootstrap.
//! assert_eq!(registry.get_lang("greeting", "Hello").as_deref(), Some("Hello"));
//!
//! let german = registry.resolve_by_text("Deutsch").unwrap();
//! assert_eq!(german.alpha2(), Some("de"));
//! ```
//!
//! # Collecting default strings
//!
//! Components register a [`LanguageReloader`]. A call to
//! [`LanguageRegistry::collect_default_language_keys`] runs every reloader and
//! returns each key and default string they requested, which is how
//! translation files are checked for completeness.

mod alias;
mod catalog;
mod config;
mod error;
mod loader;
mod locale;
mod properties;
mod record;
mod registry;
mod reload;
mod store;

pub use alias::AliasSet;
pub use catalog::{attach_locales, parse_catalog, parse_row, BOOTSTRAP_CATALOG};
pub use config::{
	load_config, LanguageConfig, LanguageConfigLayer, DEFAULT_FILE_PREFIX, DEFAULT_LANGUAGE,
};
pub use error::{ConfigError, LanguageError};
pub use loader::{file_to_language_code, LoadOptions};
pub use locale::{
	parse_locale_list, parse_locale_tag, system_locale, AVAILABLE_LOCALES, AVAILABLE_LOCALE_TAGS,
};
pub use properties::parse_properties;
pub use record::{LanguageRecord, MatchTarget};
pub use registry::{LanguageRegistry, UNDETERMINED_CODE};
pub use reload::{LanguageReloader, ReloadReport, ReloaderId};
pub use store::{DefaultsSink, TranslationStore};

pub use unic_langid::LanguageIdentifier;
