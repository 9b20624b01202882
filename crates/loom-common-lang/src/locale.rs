// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime locale values.
//!
//! Locales are [`LanguageIdentifier`]s. The set of locales a language record can
//! be associated with comes from [`AVAILABLE_LOCALES`] unless configuration
//! supplies its own list.

use once_cell::sync::Lazy;
use tracing::{trace, warn};
use unic_langid::LanguageIdentifier;

/// Locale tags known to the runtime, language-only tags first per language.
pub const AVAILABLE_LOCALE_TAGS: &[&str] = &[
	"af", "af-ZA", "am", "am-ET", "ar", "ar-AE", "ar-BH", "ar-DZ", "ar-EG", "ar-IQ", "ar-JO",
	"ar-KW", "ar-LB", "ar-LY", "ar-MA", "ar-OM", "ar-QA", "ar-SA", "ar-SD", "ar-SY", "ar-TN",
	"ar-YE", "as", "as-IN", "az", "az-AZ", "be", "be-BY", "bg", "bg-BG", "bn", "bn-BD", "bn-IN",
	"bo", "bo-CN", "br", "br-FR", "bs", "bs-BA", "ca", "ca-ES", "cs", "cs-CZ", "cy", "cy-GB",
	"da", "da-DK", "de", "de-AT", "de-BE", "de-CH", "de-DE", "de-LI", "de-LU", "el", "el-CY",
	"el-GR", "en", "en-AU", "en-CA", "en-GB", "en-IE", "en-IN", "en-MT", "en-NZ", "en-PH",
	"en-SG", "en-US", "en-ZA", "eo", "es", "es-AR", "es-BO", "es-CL", "es-CO", "es-CR", "es-DO",
	"es-EC", "es-ES", "es-GT", "es-HN", "es-MX", "es-NI", "es-PA", "es-PE", "es-PR", "es-PY",
	"es-SV", "es-US", "es-UY", "es-VE", "et", "et-EE", "eu", "eu-ES", "fa", "fa-IR", "fi",
	"fi-FI", "fo", "fo-FO", "fr", "fr-BE", "fr-CA", "fr-CH", "fr-FR", "fr-LU", "fr-MC", "ga",
	"ga-IE", "gd", "gd-GB", "gl", "gl-ES", "gu", "gu-IN", "ha", "ha-NG", "he", "he-IL", "hi",
	"hi-IN", "hr", "hr-HR", "hu", "hu-HU", "hy", "hy-AM", "id", "id-ID", "ig", "ig-NG", "is",
	"is-IS", "it", "it-CH", "it-IT", "ja", "ja-JP", "ka", "ka-GE", "kk", "kk-KZ", "km", "km-KH",
	"kn", "kn-IN", "ko", "ko-KR", "ku", "ky", "ky-KG", "la", "lb", "lb-LU", "lo", "lo-LA", "lt",
	"lt-LT", "lv", "lv-LV", "mi", "mi-NZ", "mk", "mk-MK", "ml", "ml-IN", "mn", "mn-MN", "mr",
	"mr-IN", "ms", "ms-MY", "mt", "mt-MT", "my", "my-MM", "nb", "nb-NO", "ne", "ne-NP", "nl",
	"nl-BE", "nl-NL", "nn", "nn-NO", "no", "no-NO", "or", "or-IN", "pa", "pa-IN", "pl", "pl-PL",
	"ps", "ps-AF", "pt", "pt-AO", "pt-BR", "pt-PT", "rm", "rm-CH", "ro", "ro-MD", "ro-RO", "ru",
	"ru-RU", "ru-UA", "rw", "rw-RW", "sa", "sa-IN", "sd", "se", "se-NO", "si", "si-LK", "sk",
	"sk-SK", "sl", "sl-SI", "so", "so-SO", "sq", "sq-AL", "sr", "sr-BA", "sr-ME", "sr-RS", "sv",
	"sv-FI", "sv-SE", "sw", "sw-KE", "sw-TZ", "ta", "ta-IN", "ta-LK", "te", "te-IN", "tg",
	"tg-TJ", "th", "th-TH", "ti", "ti-ER", "tk", "tk-TM", "tr", "tr-TR", "tt", "tt-RU", "ug",
	"ug-CN", "uk", "uk-UA", "ur", "ur-PK", "uz", "uz-UZ", "vi", "vi-VN", "wo", "wo-SN", "xh",
	"xh-ZA", "yi", "yo", "yo-NG", "zh", "zh-CN", "zh-HK", "zh-SG", "zh-TW", "zu", "zu-ZA",
	"haw", "haw-US", "fil", "fil-PH", "ast", "ast-ES", "chr", "chr-US",
];

/// Parsed form of [`AVAILABLE_LOCALE_TAGS`].
pub static AVAILABLE_LOCALES: Lazy<Vec<LanguageIdentifier>> =
	Lazy::new(|| parse_locale_list(AVAILABLE_LOCALE_TAGS.iter().copied()));

/// Parse a list of locale tags, dropping (and logging) the ones that fail.
pub fn parse_locale_list<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<LanguageIdentifier> {
	tags
		.into_iter()
		.filter_map(|tag| {
			let parsed = parse_locale_tag(tag);
			if parsed.is_none() {
				warn!(tag = %tag, "ignoring invalid locale tag");
			}
			parsed
		})
		.collect()
}

/// Best-effort parse of a locale tag such as `fr-CA`, `fr_CA` or
/// `en_US.UTF-8`.
///
/// Returns `None` for empty input, the POSIX `C` locale and anything that is
/// not a well-formed tag.
pub fn parse_locale_tag(text: &str) -> Option<LanguageIdentifier> {
	let tag = text
		.split(['.', '@'])
		.next()
		.unwrap_or_default()
		.trim()
		.replace('_', "-");

	if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
		return None;
	}

	match tag.parse::<LanguageIdentifier>() {
		Ok(locale) => Some(locale),
		Err(e) => {
			trace!(tag = %tag, error = %e, "not a locale tag");
			None
		}
	}
}

/// The ambient locale of the current process, if it can be determined.
pub fn system_locale() -> Option<LanguageIdentifier> {
	sys_locale::get_locale().and_then(|tag| parse_locale_tag(&tag))
}

/// Locale rendered with `_` between subtags, e.g. `fr_CA`.
pub fn posix_form(locale: &LanguageIdentifier) -> String {
	locale.to_string().replace('-', "_")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_available_locales_all_parse() {
		assert_eq!(AVAILABLE_LOCALES.len(), AVAILABLE_LOCALE_TAGS.len());
	}

	#[test]
	fn test_parse_bcp47_and_posix_forms() {
		let expected: LanguageIdentifier = "fr-CA".parse().unwrap();
		assert_eq!(parse_locale_tag("fr-CA"), Some(expected.clone()));
		assert_eq!(parse_locale_tag("fr_CA"), Some(expected.clone()));
		assert_eq!(parse_locale_tag("fr_CA.UTF-8"), Some(expected.clone()));
		assert_eq!(parse_locale_tag("fr_CA@euro"), Some(expected));
	}

	#[test]
	fn test_parse_rejects_non_tags() {
		assert_eq!(parse_locale_tag(""), None);
		assert_eq!(parse_locale_tag("C"), None);
		assert_eq!(parse_locale_tag("POSIX"), None);
		assert_eq!(parse_locale_tag("not a locale"), None);
	}

	#[test]
	fn test_parse_locale_list_skips_invalid() {
		let locales = parse_locale_list(["en-US", "!!", "de"]);
		assert_eq!(locales.len(), 2);
		assert_eq!(locales[0].to_string(), "en-US");
		assert_eq!(locales[1].to_string(), "de");
	}

	#[test]
	fn test_posix_form() {
		let locale: LanguageIdentifier = "pt-BR".parse().unwrap();
		assert_eq!(posix_form(&locale), "pt_BR");
	}
}
