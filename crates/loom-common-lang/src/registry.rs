// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The language registry.
//!
//! A [`LanguageRegistry`] owns the catalog of known languages, the active
//! language, and the reload callbacks of every component that displays
//! translated strings.
//!
//! Readers work on `Arc` snapshots of the catalog, so lookups never block on a
//! reload. Catalog reloads and active-language changes are serialized on one
//! lock. Collection passes are serialized on their own lock so reloaders can
//! call back into the registry while a pass runs.

use std::collections::HashMap;
use std::io::BufRead;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, error, info, trace, warn};
use unic_langid::LanguageIdentifier;

use crate::catalog::{attach_locales, parse_catalog, BOOTSTRAP_CATALOG};
use crate::config::{load_config, LanguageConfig};
use crate::error::LanguageError;
use crate::loader::LoadOptions;
use crate::locale::{parse_locale_list, parse_locale_tag, system_locale, AVAILABLE_LOCALES};
use crate::record::{LanguageRecord, MatchTarget};
use crate::reload::{LanguageReloader, ReloadReport, ReloaderId};
use crate::store::DefaultsSink;

/// Reserved ISO 639-2 code for an undetermined language.
pub const UNDETERMINED_CODE: &str = "und";

type Catalog = Arc<Vec<Arc<LanguageRecord>>>;

fn read<T: Clone>(lock: &RwLock<T>) -> T {
	lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn write<T>(lock: &RwLock<T>, value: T) {
	*lock.write().unwrap_or_else(PoisonError::into_inner) = value;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct LanguageRegistry {
	config: LanguageConfig,
	available_locales: Vec<LanguageIdentifier>,
	catalog: RwLock<Catalog>,
	active: RwLock<Option<Arc<LanguageRecord>>>,
	undetermined: RwLock<Option<Arc<LanguageRecord>>>,
	default: RwLock<Option<Arc<LanguageRecord>>>,
	reloaders: RwLock<Vec<(ReloaderId, Arc<dyn LanguageReloader>)>>,
	next_reloader_id: AtomicU64,
	collecting: AtomicBool,
	collected: Mutex<Option<HashMap<String, String>>>,
	collect_pass: Mutex<()>,
	admin: Mutex<()>,
}

impl std::fmt::Debug for LanguageRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LanguageRegistry")
			.field("languages", &read(&self.catalog).len())
			.field("active", &read(&self.active).map(|l| l.to_string()))
			.field("reloaders", &self.reloaders.read().map(|r| r.len()).unwrap_or(0))
			.finish()
	}
}

impl LanguageRegistry {
	/// Create a registry with an empty catalog and no active language.
	pub fn new(config: LanguageConfig) -> Self {
		let available_locales = match &config.available_locales {
			Some(tags) => parse_locale_list(tags.iter().map(String::as_str)),
			None => AVAILABLE_LOCALES.clone(),
		};

		Self {
			config,
			available_locales,
			catalog: RwLock::new(Arc::new(Vec::new())),
			active: RwLock::new(None),
			undetermined: RwLock::new(None),
			default: RwLock::new(None),
			reloaders: RwLock::new(Vec::new()),
			next_reloader_id: AtomicU64::new(1),
			collecting: AtomicBool::new(false),
			collected: Mutex::new(None),
			collect_pass: Mutex::new(()),
			admin: Mutex::new(()),
		}
	}

	/// Create a registry and bring it into its start state: catalog loaded,
	/// default language active, configured translations loaded.
	///
	/// Only a failure to read the catalog is returned. Translation loading is
	/// best effort and only logs.
	pub fn bootstrap(config: LanguageConfig) -> Result<Self, LanguageError> {
		let registry = Self::new(config);

		match registry.config.catalog_path.clone() {
			Some(path) => registry.load_catalog_file(&path)?,
			None => registry.load_catalog_str(BOOTSTRAP_CATALOG)?,
		};

		let default_language = registry.config.default_language.clone();
		if registry.set_active_language(&default_language).is_none() {
			warn!(language = %default_language, "default language not found in catalog");
		}

		if let Some(path) = registry.config.translations_path.clone() {
			if let Err(e) = registry.load_path(&path, registry.load_options()) {
				warn!(path = %path.display(), error = %e, "translations not loaded, continuing bootstrap");
			}
		}

		Ok(registry)
	}

	/// Load configuration from defaults, the TOML file at `path` and the
	/// environment, then [`bootstrap`](Self::bootstrap) from it.
	pub fn from_config_file(path: Option<&Path>) -> Result<Self, LanguageError> {
		let config = load_config(path)?;
		Self::bootstrap(config)
	}

	pub fn config(&self) -> &LanguageConfig {
		&self.config
	}

	/// Load options taken from the configuration.
	pub fn load_options(&self) -> LoadOptions {
		LoadOptions {
			overwrite: self.config.overwrite,
			append: self.config.append,
		}
	}

	pub fn available_locales(&self) -> &[LanguageIdentifier] {
		&self.available_locales
	}

	/// Replace the catalog with the rows read from `reader`.
	///
	/// Runtime locales are attached before the new catalog is published.
	/// Cached language pointers are reset and the active language is resolved
	/// again in the new catalog. Returns the number of languages loaded.
	pub fn load_catalog<R: BufRead>(&self, reader: R) -> Result<usize, LanguageError> {
		let _admin = lock(&self.admin);

		let mut records = parse_catalog(reader)?;
		attach_locales(&mut records, &self.available_locales);
		let count = records.len();

		let catalog: Catalog = Arc::new(records.into_iter().map(Arc::new).collect());
		write(&self.catalog, catalog);
		write(&self.undetermined, None);
		write(&self.default, None);

		if let Some(previous) = read(&self.active) {
			let code = previous
				.alpha3_bibliographic()
				.or(previous.alpha2())
				.or(previous.english_name())
				.map(str::to_string);
			let active = code.and_then(|code| self.resolve_by_text(&code));
			write(&self.active, active);
		}

		info!(count, "loaded language catalog");
		Ok(count)
	}

	pub fn load_catalog_str(&self, source: &str) -> Result<usize, LanguageError> {
		self.load_catalog(source.as_bytes())
	}

	pub fn load_catalog_file(&self, path: &Path) -> Result<usize, LanguageError> {
		let file = std::fs::File::open(path).map_err(|e| {
			error!(path = %path.display(), error = %e, "failed to open language catalog");
			LanguageError::io(path, e)
		})?;
		self.load_catalog(std::io::BufReader::new(file))
	}

	/// Snapshot of the catalog in source order.
	pub fn languages(&self) -> Vec<Arc<LanguageRecord>> {
		(*read(&self.catalog)).clone()
	}

	/// First catalog record matching `target`.
	pub fn find<'a>(&self, target: impl Into<MatchTarget<'a>>) -> Option<Arc<LanguageRecord>> {
		let target = target.into();
		read(&self.catalog)
			.iter()
			.find(|record| record.matches(target))
			.cloned()
	}

	pub fn resolve_by_locale(&self, locale: &LanguageIdentifier) -> Option<Arc<LanguageRecord>> {
		self.find(locale)
	}

	/// Resolve free text: codes, names, aliases and locale strings first,
	/// then the text parsed as a locale tag.
	pub fn resolve_by_text(&self, text: &str) -> Option<Arc<LanguageRecord>> {
		if let Some(record) = self.find(text) {
			trace!(text = %text, language = %record, "resolved language by text");
			return Some(record);
		}

		let locale = parse_locale_tag(text)?;
		let record = self.resolve_by_locale(&locale);
		if let Some(record) = &record {
			trace!(text = %text, language = %record, "resolved language by locale tag");
		}
		record
	}

	/// The record for the reserved `und` code, cached once found.
	pub fn undetermined_language(&self) -> Option<Arc<LanguageRecord>> {
		if let Some(record) = read(&self.undetermined) {
			return Some(record);
		}
		let record = self.resolve_by_text(UNDETERMINED_CODE)?;
		write(&self.undetermined, Some(record.clone()));
		Some(record)
	}

	/// The record for the process's ambient locale, cached once found.
	///
	/// The ambient locale is the configured `system_locale` if set, otherwise
	/// the operating system's.
	pub fn default_language(&self) -> Option<Arc<LanguageRecord>> {
		if let Some(record) = read(&self.default) {
			return Some(record);
		}
		let locale = match &self.config.system_locale {
			Some(tag) => parse_locale_tag(tag),
			None => system_locale(),
		}?;
		let record = self.resolve_by_locale(&locale)?;
		debug!(locale = %locale, language = %record, "resolved default language");
		write(&self.default, Some(record.clone()));
		Some(record)
	}

	/// Resolve `text` and make it the active language. When nothing matches
	/// the registry is left without an active language.
	pub fn set_active_language(&self, text: &str) -> Option<Arc<LanguageRecord>> {
		let _admin = lock(&self.admin);
		let record = self.resolve_by_text(text);
		match &record {
			Some(record) => info!(text = %text, language = %record, "set active language"),
			None => warn!(text = %text, "no language matches, active language cleared"),
		}
		write(&self.active, record.clone());
		record
	}

	pub fn active_language(&self) -> Option<Arc<LanguageRecord>> {
		read(&self.active)
	}

	/// Translated string from the active language, or from the default
	/// language when none is active. `None` if neither exists.
	pub fn get_lang(&self, key: &str, default: &str) -> Option<String> {
		let record = self.active_language().or_else(|| self.default_language());
		self.get_lang_for(record.as_deref(), key, default)
	}

	/// Translated string from `language`. `None` if no language is given.
	///
	/// The collection lock is only taken while a collection pass runs.
	pub fn get_lang_for(
		&self,
		language: Option<&LanguageRecord>,
		key: &str,
		default: &str,
	) -> Option<String> {
		let language = language?;
		if !self.collecting.load(Ordering::Acquire) {
			return Some(language.get(key, default, None));
		}
		let mut collected = lock(&self.collected);
		let sink = collected.as_mut().map(|map| map as &mut dyn DefaultsSink);
		Some(language.get(key, default, sink))
	}

	pub fn is_collecting(&self) -> bool {
		self.collecting.load(Ordering::Acquire)
	}

	pub fn add_reloader(&self, reloader: impl LanguageReloader + 'static) -> ReloaderId {
		self.add_shared_reloader(Arc::new(reloader))
	}

	pub fn add_shared_reloader(&self, reloader: Arc<dyn LanguageReloader>) -> ReloaderId {
		let id = ReloaderId(self.next_reloader_id.fetch_add(1, Ordering::Relaxed));
		self
			.reloaders
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.push((id, reloader));
		debug!(reloader = %id, "registered language reloader");
		id
	}

	pub fn remove_reloader(&self, id: ReloaderId) -> bool {
		let mut reloaders = self.reloaders.write().unwrap_or_else(PoisonError::into_inner);
		let before = reloaders.len();
		reloaders.retain(|(existing, _)| *existing != id);
		before != reloaders.len()
	}

	/// Invoke every registered reloader in registration order.
	///
	/// A failing or panicking reloader is logged and counted; the remaining
	/// reloaders still run.
	pub fn reload_languages(&self) -> ReloadReport {
		let reloaders: Vec<_> = self
			.reloaders
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone();

		let mut report = ReloadReport::default();
		for (id, reloader) in reloaders {
			report.invoked += 1;
			match catch_unwind(AssertUnwindSafe(|| reloader.reload_language(self))) {
				Ok(Ok(())) => {}
				Ok(Err(e)) => {
					report.failed += 1;
					error!(reloader = %id, error = %e, "error while reloading language");
				}
				Err(_) => {
					report.failed += 1;
					error!(reloader = %id, "reloader panicked while reloading language");
				}
			}
		}

		debug!(
			invoked = report.invoked,
			failed = report.failed,
			"reloaded languages"
		);
		report
	}

	/// Run every reloader with collection on and return each `(key, default)`
	/// pair requested through [`LanguageRegistry::get_lang`] during the pass.
	///
	/// Must not be called from inside a reloader.
	pub fn collect_default_language_keys(&self) -> HashMap<String, String> {
		let _pass = lock(&self.collect_pass);

		*lock(&self.collected) = Some(HashMap::new());
		self.collecting.store(true, Ordering::Release);
		let report = self.reload_languages();
		self.collecting.store(false, Ordering::Release);
		let collected = lock(&self.collected).take().unwrap_or_default();

		info!(
			keys = collected.len(),
			failed = report.failed,
			"collected default language keys"
		);
		collected
	}
}
