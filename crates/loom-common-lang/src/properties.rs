// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reader for `key=value` properties files.
//!
//! Supported syntax:
//! - `#` and `!` comment lines, blank lines
//! - `=`, `:` or whitespace between key and value
//! - a trailing `\` continues the logical line on the next physical line
//! - escapes `\t`, `\n`, `\r`, `\f`, `\uXXXX`; any other escaped character
//!   stands for itself

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::LanguageError;

/// Parse properties content into a flat map. Later keys win.
///
/// Lines are read as UTF-8; a line that is not valid UTF-8 is decoded as
/// ISO-8859-1, the traditional properties encoding.
pub fn parse_properties<R: BufRead>(
	mut reader: R,
) -> Result<HashMap<String, String>, LanguageError> {
	let mut entries = HashMap::new();
	let mut logical = String::new();
	let mut start_line = 0;
	let mut buf = Vec::new();

	for index in 0.. {
		buf.clear();
		if reader.read_until(b'\n', &mut buf)? == 0 {
			break;
		}
		let line = decode_line(&buf);
		let line = if index == 0 {
			line.strip_prefix('\u{feff}').unwrap_or(&line).to_string()
		} else {
			line
		};
		let trimmed = line.trim_start();

		if logical.is_empty() {
			if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
				continue;
			}
			start_line = index + 1;
		}

		if ends_with_continuation(trimmed) {
			logical.push_str(&trimmed[..trimmed.len() - 1]);
			continue;
		}
		logical.push_str(trimmed);

		let (key, value) = split_entry(&logical, start_line)?;
		entries.insert(key, value);
		logical.clear();
	}

	if !logical.is_empty() {
		let (key, value) = split_entry(&logical, start_line)?;
		entries.insert(key, value);
	}

	Ok(entries)
}

fn decode_line(raw: &[u8]) -> String {
	let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
	let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
	match std::str::from_utf8(raw) {
		Ok(line) => line.to_string(),
		Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
	}
}

/// Odd number of trailing backslashes.
fn ends_with_continuation(line: &str) -> bool {
	line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(logical: &str, line: usize) -> Result<(String, String), LanguageError> {
	let mut key_end = logical.len();
	let mut escaped = false;

	for (i, c) in logical.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		match c {
			'\\' => escaped = true,
			'=' | ':' => {
				key_end = i;
				break;
			}
			c if c.is_whitespace() => {
				key_end = i;
				break;
			}
			_ => {}
		}
	}

	let key = unescape(&logical[..key_end], line)?;
	let rest = logical.get(key_end..).unwrap_or_default();

	// Whitespace, then at most one separator, then whitespace.
	let rest = rest.trim_start();
	let rest = rest
		.strip_prefix('=')
		.or_else(|| rest.strip_prefix(':'))
		.unwrap_or(rest)
		.trim_start();

	Ok((key, unescape(rest, line)?))
}

fn unescape(raw: &str, line: usize) -> Result<String, LanguageError> {
	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars();

	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}
		match chars.next() {
			Some('t') => out.push('\t'),
			Some('n') => out.push('\n'),
			Some('r') => out.push('\r'),
			Some('f') => out.push('\u{000c}'),
			Some('u') => {
				let hex: String = chars.by_ref().take(4).collect();
				let decoded = u32::from_str_radix(&hex, 16)
					.ok()
					.filter(|_| hex.len() == 4)
					.and_then(char::from_u32)
					.ok_or_else(|| LanguageError::Properties {
						line,
						message: format!("malformed \\u escape '\\u{hex}'"),
					})?;
				out.push(decoded);
			}
			Some(other) => out.push(other),
			None => {}
		}
	}

	Ok(out)
}
