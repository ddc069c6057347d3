// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment extraction failures into miette reports.
//!
//! An unknown key is pointed at in the TOML it came from and, when a known
//! key is close enough by Jaro-Winkler score, a correction is offered.

#![allow(unused_assignments)] // triggered by the miette derive expansion

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Scores at or below this are not worth suggesting.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading `logos.toml`.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(logos::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Comma-separated keys accepted in the same table.
        valid_keys: String,
        #[label("not a logos setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(logos::config::invalid_type), help("use a {expected} here"))]
    InvalidType {
        /// Dotted path, e.g. `storage.wal_mode`.
        key: String,
        detail: String,
        expected: String,
    },

    #[error("`{key}` must be set")]
    #[diagnostic(
        code(logos::config::missing_key),
        help("set `{key}` in logos.toml or through a LOGOS_ variable")
    )]
    MissingKey { key: String },

    /// A value that parsed but makes no sense, e.g. an empty database path.
    #[error("invalid setting: {message}")]
    #[diagnostic(code(logos::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(logos::config::other))]
    Other(String),
}

impl From<ConfigError> for logos_core::LogosError {
    fn from(err: ConfigError) -> Self {
        logos_core::LogosError::Config(err.to_string())
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let listing = format!("accepted here: {valid_keys}");
    match suggestion {
        Some(closest) => format!("did you mean `{closest}`? {listing}"),
        None => listing,
    }
}

/// Map every error carried by `err` to a diagnostic.
///
/// `toml_sources` holds `(path, contents)` pairs used to place labels.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| to_config_error(&error, toml_sources))
        .collect()
}

fn to_config_error(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let (span, src) = match locate_key(error, field, toml_sources) {
                Some((span, src)) => (Some(span), Some(src)),
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, expected),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.to_string(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: dotted_path(error),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn dotted_path(error: &figment::Error) -> String {
    error
        .path
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(".")
}

/// Span and named source for `field` in whichever TOML file reported it.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|meta| meta.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // String providers carry no path; only an unambiguous source is used.
    let (path, content) = match origin {
        Some(origin) => toml_sources.iter().find(|(path, _)| *path == origin)?,
        None if toml_sources.len() == 1 => &toml_sources[0],
        None => return None,
    };

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset where `field` is assigned, searching below the `[table]`
/// header named by the first element of `path` (or from the top when empty).
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(table) => {
            let header = format!("[{table}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut line_start = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let assigns_field = line[indent..]
            .strip_prefix(field)
            .is_some_and(|rest| rest.starts_with([' ', '\t', '=']));
        if assigns_field {
            return Some(line_start + indent);
        }
        line_start += line.len();
    }
    None
}

/// Closest entry of `valid_keys` to `unknown`, if any scores above the threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print each error to stderr, graphically when the handler can render it.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_level_for_levle() {
        let valid = &["level"];
        assert_eq!(suggest_key("levle", valid), Some("level".to_string()));
    }

    #[test]
    fn suggest_database_path_for_typo() {
        let valid = &["database_path", "wal_mode"];
        assert_eq!(
            suggest_key("databse_path", valid),
            Some("database_path".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["migrate_legacy", "legacy_record"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[logging]\nlevle = \"debug\"\n";
        let path = vec!["logging".to_string()];
        let o = find_key_offset(content, &path, "levle").unwrap();
        assert_eq!(&content[o..o + 5], "levle");
    }

    #[test]
    fn find_key_offset_handles_crlf() {
        let content = "[guard]\r\n  legacy_recrod = \"x\"\r\n";
        let path = vec!["guard".to_string()];
        let o = find_key_offset(content, &path, "legacy_recrod").unwrap();
        assert_eq!(&content[o..o + 13], "legacy_recrod");
    }

    #[test]
    fn find_key_offset_skips_longer_keys_with_same_prefix() {
        let content = "[storage]\nwal_mode_x = true\nwal_mode = false\n";
        let path = vec!["storage".to_string()];
        let o = find_key_offset(content, &path, "wal_mode").unwrap();
        assert_eq!(&content[o..o + 16], "wal_mode = false");
    }

    #[test]
    fn missing_section_yields_no_offset() {
        let content = "[logging]\nlevel = \"info\"\n";
        let path = vec!["guard".to_string()];
        assert_eq!(find_key_offset(content, &path, "level"), None);
    }

    #[test]
    fn unknown_key_in_inline_source_carries_a_span() {
        let content = "[storage]\ndatabse_path = \"/tmp/x.db\"\n";
        let err = crate::loader::load_config_from_str(content).unwrap_err();
        let sources = vec![("<inline>".to_string(), content.to_string())];

        let errors = figment_to_config_errors(err, &sources);
        let span = errors
            .iter()
            .find_map(|e| match e {
                ConfigError::UnknownKey { span, .. } => *span,
                _ => None,
            })
            .expect("span for the unknown key");
        assert_eq!(
            &content[span.offset()..span.offset() + span.len()],
            "databse_path"
        );
    }
}
