// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading translation files into language records.
//!
//! Translation files are named `<prefix><CODE>[.ext]`, by default
//! `lang_EN.properties`. The code is upper-cased and resolved like any other
//! language text; the file content is a properties file.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::LanguageError;
use crate::properties::parse_properties;
use crate::record::LanguageRecord;
use crate::registry::LanguageRegistry;

/// How loaded entries combine with a record's existing translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
	/// Replace existing values for keys present in the file.
	pub overwrite: bool,
	/// Keep existing entries; otherwise the store is cleared first.
	pub append: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			overwrite: true,
			append: false,
		}
	}
}

/// Language code carried by a translation file name, upper-cased.
///
/// `lang_de.properties` with prefix `lang_` yields `DE`. Returns `None` when
/// the name lacks the prefix or the code is empty.
pub fn file_to_language_code(file_name: &str, prefix: &str) -> Option<String> {
	let rest = file_name.strip_prefix(prefix)?;
	let code = rest.split('.').next().unwrap_or_default();
	if code.is_empty() {
		return None;
	}
	Some(code.to_uppercase())
}

impl LanguageRegistry {
	/// Load properties content for the language resolved from `code`.
	pub fn load_reader<R: BufRead>(
		&self,
		code: &str,
		reader: R,
		options: LoadOptions,
	) -> Result<Arc<LanguageRecord>, LanguageError> {
		let entries = parse_properties(reader)?;
		let language = self
			.resolve_by_text(code)
			.ok_or_else(|| LanguageError::UnknownLanguage(code.to_string()))?;

		if !options.append {
			language.clear_translations();
		}
		let count = entries.len();
		language.merge_translations(entries, options.overwrite);

		info!(code = %code, language = %language, entries = count, "loaded language");
		Ok(language)
	}

	/// Load one translation file. A directory is loaded as a folder.
	pub fn load_file(
		&self,
		path: &Path,
		options: LoadOptions,
	) -> Result<Vec<Arc<LanguageRecord>>, LanguageError> {
		if path.is_dir() {
			return self.load_folder(path, options);
		}
		self
			.try_load_file(path, options)
			.map(|language| vec![language])
			.inspect_err(|e| {
				error!(path = %path.display(), error = %e, "error while loading language from file");
			})
	}

	/// Load every translation file directly inside `folder`, in file name
	/// order. A plain file is loaded as a single file.
	///
	/// Files that fail to load are logged and skipped.
	pub fn load_folder(
		&self,
		folder: &Path,
		options: LoadOptions,
	) -> Result<Vec<Arc<LanguageRecord>>, LanguageError> {
		if !folder.exists() {
			error!(path = %folder.display(), "error while loading languages, folder does not exist");
			return Err(LanguageError::NotFound(folder.to_path_buf()));
		}
		if !folder.is_dir() {
			return self.load_file(folder, options);
		}

		let read_dir = std::fs::read_dir(folder).map_err(|e| {
			error!(path = %folder.display(), error = %e, "error while listing languages folder");
			LanguageError::io(folder, e)
		})?;

		let mut files: Vec<_> = read_dir
			.filter_map(Result::ok)
			.map(|entry| entry.path())
			.filter(|path| path.is_file())
			.filter(|path| {
				path
					.file_name()
					.and_then(|name| name.to_str())
					.is_some_and(|name| name.starts_with(&self.config().file_prefix))
			})
			.collect();
		files.sort();

		let mut loaded = Vec::with_capacity(files.len());
		for path in files {
			match self.try_load_file(&path, options) {
				Ok(language) => loaded.push(language),
				Err(e) => {
					error!(path = %path.display(), error = %e, "error while loading language from file");
				}
			}
		}

		debug!(path = %folder.display(), count = loaded.len(), "loaded languages folder");
		Ok(loaded)
	}

	/// Load a translation file or folder, whichever `path` points to.
	pub fn load_path(
		&self,
		path: &Path,
		options: LoadOptions,
	) -> Result<Vec<Arc<LanguageRecord>>, LanguageError> {
		if path.is_dir() {
			self.load_folder(path, options)
		} else {
			self.load_file(path, options)
		}
	}

	fn try_load_file(
		&self,
		path: &Path,
		options: LoadOptions,
	) -> Result<Arc<LanguageRecord>, LanguageError> {
		if !path.exists() {
			return Err(LanguageError::NotFound(path.to_path_buf()));
		}

		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		let code = file_to_language_code(&name, &self.config().file_prefix)
			.ok_or_else(|| LanguageError::InvalidFileName(name.clone()))?;

		let file = std::fs::File::open(path).map_err(|e| LanguageError::io(path, e))?;
		self.load_reader(&code, BufReader::new(file), options)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::LanguageConfig;
	use tempfile::TempDir;

	const CATALOG: &str = "\
eng,eng,en,English,Anglais,Englisch
fra,fra,fr,French,Français,Französisch
ger,deu,de,German,allemand,Deutsch
";

	fn registry() -> LanguageRegistry {
		let registry = LanguageRegistry::new(LanguageConfig {
			system_locale: Some("C".to_string()),
			..Default::default()
		});
		registry.load_catalog_str(CATALOG).unwrap();
		registry
	}

	fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
		let path = dir.path().join(name);
		std::fs::write(&path, content).unwrap();
		path
	}

	#[test]
	fn test_file_to_language_code() {
		assert_eq!(
			file_to_language_code("lang_en.properties", "lang_").as_deref(),
			Some("EN")
		);
		assert_eq!(file_to_language_code("lang_de", "lang_").as_deref(), Some("DE"));
		assert_eq!(
			file_to_language_code("lang_fr.tar.gz", "lang_").as_deref(),
			Some("FR")
		);
		assert_eq!(file_to_language_code("lang_", "lang_"), None);
		assert_eq!(file_to_language_code("readme.md", "lang_"), None);
	}

	#[test]
	fn test_load_file() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "lang_en.properties", "hi=Hello\n");
		let registry = registry();

		let loaded = registry.load_file(&path, LoadOptions::default()).unwrap();
		assert_eq!(loaded.len(), 1);

		let en = registry.resolve_by_text("en").unwrap();
		assert_eq!(
			registry.get_lang_for(Some(&*en), "hi", "Hi").as_deref(),
			Some("Hello")
		);
		assert_eq!(
			registry.get_lang_for(Some(&*en), "missing", "Def").as_deref(),
			Some("Def")
		);
	}

	#[test]
	fn test_load_with_append_keeps_existing_entries() {
		let dir = TempDir::new().unwrap();
		let first = write(&dir, "lang_de.properties", "a=1\n");
		let registry = registry();
		registry.load_file(&first, LoadOptions::default()).unwrap();

		let second = write(&dir, "lang_de.txt", "b=2\n");
		let options = LoadOptions {
			overwrite: true,
			append: true,
		};
		registry.load_file(&second, options).unwrap();

		let de = registry.resolve_by_text("de").unwrap();
		assert_eq!(de.get("a", "", None), "1");
		assert_eq!(de.get("b", "", None), "2");
	}

	#[test]
	fn test_load_without_append_clears_first() {
		let dir = TempDir::new().unwrap();
		let first = write(&dir, "lang_de.properties", "a=1\n");
		let registry = registry();
		registry.load_file(&first, LoadOptions::default()).unwrap();

		let second = write(&dir, "lang_de.txt", "b=2\n");
		registry.load_file(&second, LoadOptions::default()).unwrap();

		let de = registry.resolve_by_text("de").unwrap();
		assert!(!de.store().contains_key("a"));
		assert_eq!(de.get("b", "", None), "2");
	}

	#[test]
	fn test_load_without_overwrite_merges_nothing() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "lang_en.properties", "hi=Hello\n");
		let registry = registry();
		let options = LoadOptions {
			overwrite: false,
			append: false,
		};
		registry.load_file(&path, options).unwrap();

		let en = registry.resolve_by_text("en").unwrap();
		assert!(en.store().is_empty());
	}

	#[test]
	fn test_load_folder_skips_unmatched_and_failing_files() {
		let dir = TempDir::new().unwrap();
		write(&dir, "lang_en.properties", "hi=Hello\n");
		write(&dir, "lang_fr.properties", "hi=Bonjour\n");
		write(&dir, "lang_xx.properties", "hi=???\n");
		write(&dir, "notes.txt", "hi=ignored\n");
		std::fs::create_dir(dir.path().join("lang_de")).unwrap();

		let registry = registry();
		let loaded = registry.load_folder(dir.path(), LoadOptions::default()).unwrap();
		let codes: Vec<_> = loaded.iter().map(|l| l.alpha2().unwrap()).collect();
		assert_eq!(codes, vec!["en", "fr"]);

		let fr = registry.resolve_by_text("fr").unwrap();
		assert_eq!(fr.get("hi", "", None), "Bonjour");
	}

	#[test]
	fn test_load_path_dispatches() {
		let dir = TempDir::new().unwrap();
		let file = write(&dir, "lang_en.properties", "hi=Hello\n");
		let registry = registry();

		assert_eq!(
			registry.load_path(dir.path(), LoadOptions::default()).unwrap().len(),
			1
		);
		assert_eq!(
			registry.load_path(&file, LoadOptions::default()).unwrap().len(),
			1
		);
		assert_eq!(
			registry.load_file(dir.path(), LoadOptions::default()).unwrap().len(),
			1
		);
	}

	#[test]
	fn test_missing_path_is_not_found() {
		let dir = TempDir::new().unwrap();
		let missing = dir.path().join("nope");
		let registry = registry();

		assert!(matches!(
			registry.load_path(&missing, LoadOptions::default()),
			Err(LanguageError::NotFound(_))
		));
		assert!(matches!(
			registry.load_folder(&missing, LoadOptions::default()),
			Err(LanguageError::NotFound(_))
		));
	}

	#[test]
	fn test_unknown_language_and_bad_name() {
		let dir = TempDir::new().unwrap();
		let unknown = write(&dir, "lang_xx.properties", "k=v\n");
		let bad = write(&dir, "strings.properties", "k=v\n");
		let registry = registry();

		assert!(matches!(
			registry.load_file(&unknown, LoadOptions::default()),
			Err(LanguageError::UnknownLanguage(code)) if code == "XX"
		));
		assert!(matches!(
			registry.load_file(&bad, LoadOptions::default()),
			Err(LanguageError::InvalidFileName(_))
		));
	}

	#[test]
	fn test_load_reader_with_custom_prefix() {
		let dir = TempDir::new().unwrap();
		write(&dir, "messages_de.properties", "hi=Hallo\n");
		write(&dir, "lang_en.properties", "hi=Hello\n");

		let registry = LanguageRegistry::new(LanguageConfig {
			file_prefix: "messages_".to_string(),
			system_locale: Some("C".to_string()),
			..Default::default()
		});
		registry.load_catalog_str(CATALOG).unwrap();

		let loaded = registry.load_folder(dir.path(), LoadOptions::default()).unwrap();
		assert_eq!(loaded.len(), 1);
		assert_eq!(loaded[0].alpha2(), Some("de"));
	}

	#[test]
	fn test_load_reader_from_stream() {
		let registry = registry();
		let language = registry
			.load_reader("FR", "hi=Salut\n".as_bytes(), LoadOptions::default())
			.unwrap();
		assert_eq!(language.get("hi", "", None), "Salut");
	}
}
