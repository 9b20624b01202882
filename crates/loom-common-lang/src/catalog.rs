// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Language catalog parsing.
//!
//! A catalog is line oriented. Each data row carries six comma separated
//! fields:
//!
//! ```text
//! alpha3-b,alpha3-t,alpha2,English,French,German
//! ```
//!
//! There is no quoting. Lines starting with `#`, lines without a comma and
//! lines that do not split into exactly six fields are skipped.

use std::io::BufRead;

use tracing::{debug, trace};
use unic_langid::LanguageIdentifier;

use crate::error::LanguageError;
use crate::record::LanguageRecord;

/// ISO 639-2 catalog shipped with the crate.
pub const BOOTSTRAP_CATALOG: &str = include_str!("../data/language-codes.csv");

const SEPARATOR: char = ',';
const COMMENT: &str = "#";
const FIELD_COUNT: usize = 6;

/// Parse one catalog row, or `None` if the row is not a data row.
pub fn parse_row(line: &str) -> Option<LanguageRecord> {
	let line = line.strip_prefix('\u{feff}').unwrap_or(line);
	if !line.contains(SEPARATOR) || line.starts_with(COMMENT) {
		return None;
	}

	let fields: Vec<&str> = line.split(SEPARATOR).collect();
	if fields.len() != FIELD_COUNT {
		trace!(fields = fields.len(), line = %line, "skipping malformed catalog row");
		return None;
	}

	let field = |i: usize| Some(fields[i].to_string());
	Some(LanguageRecord::new(
		field(0),
		field(1),
		field(2),
		field(3),
		field(4),
		field(5),
	))
}

/// Parse every data row of a catalog, in source order.
///
/// Bytes that are not valid UTF-8 are replaced, so a badly encoded row never
/// costs the rows around it. Only real read failures are returned.
pub fn parse_catalog<R: BufRead>(mut reader: R) -> Result<Vec<LanguageRecord>, LanguageError> {
	let mut records = Vec::new();
	let mut buf = Vec::new();
	loop {
		buf.clear();
		if reader.read_until(b'\n', &mut buf)? == 0 {
			break;
		}
		let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
		let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
		let line = String::from_utf8_lossy(raw);
		if std::str::from_utf8(raw).is_err() {
			trace!(line = %line, "catalog row is not valid UTF-8, decoding lossily");
		}
		if let Some(record) = parse_row(&line) {
			records.push(record);
		}
	}
	debug!(count = records.len(), "parsed language catalog");
	Ok(records)
}

/// Attach each locale to every record whose text identity matches the
/// locale's language subtag.
pub fn attach_locales(records: &mut [LanguageRecord], locales: &[LanguageIdentifier]) {
	for record in records.iter_mut() {
		for locale in locales {
			if record.matches_text(locale.language.as_str()) {
				record.attach_locale(locale.clone());
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	const SAMPLE: &str = "\
# alpha3-b,alpha3-t,alpha2,English,French,German
eng,eng,en,English,Anglais,Englisch
no separator here
fra,fra,fr,French,Français,Französisch
too,few,fields
way,too,many,fields,in,this,row
und,,,Undetermined,indéterminée,Unbestimmt
";

	fn locales(tags: &[&str]) -> Vec<LanguageIdentifier> {
		tags.iter().map(|t| t.parse().unwrap()).collect()
	}

	#[test]
	fn test_parse_catalog_keeps_valid_rows_in_order() {
		let records = parse_catalog(SAMPLE.as_bytes()).unwrap();
		let names: Vec<_> = records.iter().map(|r| r.english_name()).collect();
		assert_eq!(
			names,
			vec![Some("English"), Some("French"), Some("Undetermined")]
		);
	}

	#[test]
	fn test_fields_map_positionally() {
		let record = parse_row("ger,deu,de,German,allemand,Deutsch").unwrap();
		assert_eq!(record.alpha3_bibliographic(), Some("ger"));
		assert_eq!(record.alpha3_terminologic(), Some("deu"));
		assert_eq!(record.alpha2(), Some("de"));
		assert_eq!(record.english_name(), Some("German"));
		assert_eq!(record.french_name(), Some("allemand"));
		assert_eq!(record.german_name(), Some("Deutsch"));
		assert!(record.locales().is_empty());
		assert!(record.aliases().is_empty());
	}

	#[test]
	fn test_comment_rows_are_skipped_even_with_six_fields() {
		assert!(parse_row("#ger,deu,de,German,allemand,Deutsch").is_none());
	}

	#[test]
	fn test_crlf_and_bom() {
		let records = parse_catalog("\u{feff}eng,eng,en,English,Anglais,Englisch\r\n".as_bytes())
			.unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].german_name(), Some("Englisch"));
	}

	#[test]
	fn test_invalid_utf8_row_does_not_abort_load() {
		let mut source = b"eng,eng,en,English,anglais,Englisch\n".to_vec();
		source.extend_from_slice(b"fre,fra,fr,French,fran\xe7ais,Franz\xf6sisch\n");
		source.extend_from_slice(b"ger,deu,de,German,allemand,Deutsch\n");

		let records = parse_catalog(source.as_slice()).unwrap();
		assert_eq!(records.len(), 3);
		assert_eq!(records[0].alpha2(), Some("en"));
		assert_eq!(records[1].alpha2(), Some("fr"));
		assert_eq!(records[1].english_name(), Some("French"));
		assert_eq!(records[1].french_name(), Some("fran\u{fffd}ais"));
		assert_eq!(records[2].alpha2(), Some("de"));
	}

	#[test]
	fn test_attach_locales_by_language_subtag() {
		let mut records = parse_catalog(SAMPLE.as_bytes()).unwrap();
		attach_locales(
			&mut records,
			&locales(&["en", "en-US", "fr-CA", "de-DE", "haw"]),
		);

		let tags = |r: &LanguageRecord| -> Vec<String> {
			r.locales().iter().map(|l| l.to_string()).collect()
		};
		assert_eq!(tags(&records[0]), vec!["en", "en-US"]);
		assert_eq!(tags(&records[1]), vec!["fr-CA"]);
		assert!(records[2].locales().is_empty());
	}

	#[test]
	fn test_attach_locales_via_alpha3() {
		let mut records = vec![parse_row("haw,,,Hawaiian,hawaïen,Hawaiisch").unwrap()];
		attach_locales(&mut records, &locales(&["haw-US"]));
		assert_eq!(records[0].locales().len(), 1);
	}

	#[test]
	fn test_bootstrap_catalog_parses() {
		let records = parse_catalog(BOOTSTRAP_CATALOG.as_bytes()).unwrap();
		assert!(records.len() > 100);
		assert!(records.iter().any(|r| r.matches_text("und")));
		assert!(records.iter().any(|r| r.matches_text("en")));
	}

	proptest! {
		#[test]
		fn prop_rows_without_six_fields_are_skipped(fields in proptest::collection::vec("[a-z]{0,5}", 1..12)) {
			let line = fields.join(",");
			let parsed = parse_row(&line);
			if fields.len() == 6 {
				prop_assert!(parsed.is_some());
			} else {
				prop_assert!(parsed.is_none());
			}
		}
	}
}
