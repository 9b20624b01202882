// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language configuration.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `LOOM_LANG_*` environment variables. Later layers override earlier
//! ones field by field.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const DEFAULT_LANGUAGE: &str = "EN";
pub const DEFAULT_FILE_PREFIX: &str = "lang_";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageConfigLayer {
	pub default_language: Option<String>,
	pub catalog_path: Option<PathBuf>,
	pub translations_path: Option<PathBuf>,
	pub file_prefix: Option<String>,
	pub overwrite: Option<bool>,
	pub append: Option<bool>,
	pub available_locales: Option<Vec<String>>,
	pub system_locale: Option<String>,
}

impl LanguageConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.default_language.is_some() {
			self.default_language = other.default_language;
		}
		if other.catalog_path.is_some() {
			self.catalog_path = other.catalog_path;
		}
		if other.translations_path.is_some() {
			self.translations_path = other.translations_path;
		}
		if other.file_prefix.is_some() {
			self.file_prefix = other.file_prefix;
		}
		if other.overwrite.is_some() {
			self.overwrite = other.overwrite;
		}
		if other.append.is_some() {
			self.append = other.append;
		}
		if other.available_locales.is_some() {
			self.available_locales = other.available_locales;
		}
		if other.system_locale.is_some() {
			self.system_locale = other.system_locale;
		}
	}

	pub fn finalize(self) -> LanguageConfig {
		LanguageConfig {
			default_language: self
				.default_language
				.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
			catalog_path: self.catalog_path,
			translations_path: self.translations_path,
			file_prefix: self
				.file_prefix
				.unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string()),
			overwrite: self.overwrite.unwrap_or(true),
			append: self.append.unwrap_or(false),
			available_locales: self.available_locales,
			system_locale: self.system_locale,
		}
	}

	/// Read a layer from a TOML file. A missing file yields an empty layer.
	pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			debug!(path = %path.display(), "config file not found, skipping");
			return Ok(Self::default());
		}

		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
			path: path.to_path_buf(),
			source: e,
		})?;

		toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: path.to_path_buf(),
			source: e,
		})
	}

	/// Read a layer from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(|name| std::env::var(name).ok())
	}

	/// Read a layer from an arbitrary variable lookup.
	///
	/// Convention: `LOOM_LANG_<FIELD>`.
	pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
		let flag = |name: &str| -> Result<Option<bool>, ConfigError> {
			match var(name) {
				Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Some(true)),
				Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Some(false)),
				Some(v) => Err(ConfigError::invalid_value(
					name,
					format!("expected a boolean, got '{v}'"),
				)),
				None => Ok(None),
			}
		};

		Ok(Self {
			default_language: var("LOOM_LANG_DEFAULT"),
			catalog_path: var("LOOM_LANG_CATALOG").map(PathBuf::from),
			translations_path: var("LOOM_LANG_TRANSLATIONS").map(PathBuf::from),
			file_prefix: var("LOOM_LANG_FILE_PREFIX"),
			overwrite: flag("LOOM_LANG_OVERWRITE")?,
			append: flag("LOOM_LANG_APPEND")?,
			available_locales: None,
			system_locale: var("LOOM_LANG_SYSTEM_LOCALE"),
		})
	}
}

/// Fully resolved language configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageConfig {
	/// Text resolved into the active language at bootstrap.
	pub default_language: String,
	/// Catalog file; the embedded catalog is used when unset.
	pub catalog_path: Option<PathBuf>,
	/// Translation file or folder loaded at bootstrap.
	pub translations_path: Option<PathBuf>,
	/// File name prefix of translation files, e.g. `lang_` in `lang_EN.properties`.
	pub file_prefix: String,
	pub overwrite: bool,
	pub append: bool,
	/// Runtime locale tags; the built-in table is used when unset.
	pub available_locales: Option<Vec<String>>,
	/// Pinned ambient locale; detected from the OS when unset.
	pub system_locale: Option<String>,
}

impl Default for LanguageConfig {
	fn default() -> Self {
		LanguageConfigLayer::default().finalize()
	}
}

/// Load configuration from defaults, an optional TOML file and the environment.
pub fn load_config(path: Option<&Path>) -> Result<LanguageConfig, ConfigError> {
	let mut layer = LanguageConfigLayer::default();
	if let Some(path) = path {
		layer.merge(LanguageConfigLayer::from_toml_file(path)?);
	}
	layer.merge(LanguageConfigLayer::from_env()?);
	Ok(layer.finalize())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use tempfile::TempDir;

	#[test]
	fn test_defaults() {
		let config = LanguageConfig::default();
		assert_eq!(config.default_language, "EN");
		assert_eq!(config.file_prefix, "lang_");
		assert!(config.overwrite);
		assert!(!config.append);
		assert!(config.catalog_path.is_none());
		assert!(config.available_locales.is_none());
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = LanguageConfigLayer {
			default_language: Some("EN".to_string()),
			append: Some(false),
			..Default::default()
		};
		base.merge(LanguageConfigLayer {
			default_language: Some("DE".to_string()),
			..Default::default()
		});
		assert_eq!(base.default_language.as_deref(), Some("DE"));
		assert_eq!(base.append, Some(false));
	}

	#[test]
	fn test_from_vars() {
		let vars: HashMap<&str, &str> = [
			("LOOM_LANG_DEFAULT", "fr"),
			("LOOM_LANG_TRANSLATIONS", "/srv/lang"),
			("LOOM_LANG_APPEND", "TRUE"),
			("LOOM_LANG_OVERWRITE", "0"),
			("LOOM_LANG_FILE_PREFIX", ""),
		]
		.into_iter()
		.collect();

		let layer =
			LanguageConfigLayer::from_vars(|name| vars.get(name).map(|v| v.to_string())).unwrap();
		assert_eq!(layer.default_language.as_deref(), Some("fr"));
		assert_eq!(layer.translations_path, Some(PathBuf::from("/srv/lang")));
		assert_eq!(layer.append, Some(true));
		assert_eq!(layer.overwrite, Some(false));
		assert!(layer.file_prefix.is_none());
	}

	#[test]
	fn test_from_vars_rejects_bad_flag() {
		let result = LanguageConfigLayer::from_vars(|name| {
			(name == "LOOM_LANG_APPEND").then(|| "maybe".to_string())
		});
		assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
	}

	#[test]
	fn test_toml_file() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("lang.toml");
		std::fs::write(
			&path,
			"default_language = \"DE\"\navailable_locales = [\"de-DE\", \"en-US\"]\n",
		)
		.unwrap();

		let config = LanguageConfigLayer::from_toml_file(&path).unwrap().finalize();
		assert_eq!(config.default_language, "DE");
		assert_eq!(
			config.available_locales,
			Some(vec!["de-DE".to_string(), "en-US".to_string()])
		);
	}

	#[test]
	fn test_toml_missing_file_is_empty() {
		let dir = TempDir::new().unwrap();
		let layer = LanguageConfigLayer::from_toml_file(&dir.path().join("nope.toml")).unwrap();
		assert_eq!(layer, LanguageConfigLayer::default());
	}

	#[test]
	fn test_toml_parse_error() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("bad.toml");
		std::fs::write(&path, "default_language = ").unwrap();
		let result = LanguageConfigLayer::from_toml_file(&path);
		assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
	}
}
