// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reload callbacks.

use std::fmt;

use crate::registry::LanguageRegistry;

/// A component that re-reads its translated strings when languages change.
///
/// Implementations typically call [`LanguageRegistry::get_lang`] for every
/// string they display. During
/// [`LanguageRegistry::collect_default_language_keys`] those calls are what
/// reveals the component's keys and default strings.
pub trait LanguageReloader: Send + Sync {
	fn reload_language(&self, registry: &LanguageRegistry) -> anyhow::Result<()>;
}

impl<F> LanguageReloader for F
where
	F: Fn(&LanguageRegistry) -> anyhow::Result<()> + Send + Sync,
{
	fn reload_language(&self, registry: &LanguageRegistry) -> anyhow::Result<()> {
		self(registry)
	}
}

/// Handle returned when registering a reloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReloaderId(pub(crate) u64);

impl fmt::Display for ReloaderId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "reloader-{}", self.0)
	}
}

/// Outcome of one reload pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReloadReport {
	pub invoked: usize,
	pub failed: usize,
}

impl ReloadReport {
	pub fn is_clean(&self) -> bool {
		self.failed == 0
	}
}
