// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types.

use std::path::PathBuf;

/// Errors raised while loading catalogs and translation files.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
	/// I/O error reading a file or folder
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// I/O error reading a stream
	#[error("I/O error: {0}")]
	Stream(#[from] std::io::Error),

	/// Path does not exist
	#[error("Path does not exist: {0}")]
	NotFound(PathBuf),

	/// Translation file names a code that resolves to no language
	#[error("No language found for code '{0}'")]
	UnknownLanguage(String),

	/// File name does not follow the translation file pattern
	#[error("Not a translation file name: {0}")]
	InvalidFileName(String),

	/// Malformed properties content
	#[error("Properties error on line {line}: {message}")]
	Properties { line: usize, message: String },

	/// Configuration error
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl LanguageError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Config file could not be read
	#[error("Failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Invalid value
	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
