// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script dialects: the per-platform syntax of one variable assignment.
//!
//! # Architecture
//!
//! ```text
//! Dialect (enum dispatch, pure functions)
//!   Sh           NAME=VALUE              comment '#'
//!   Batch        [@]set NAME=VALUE       no comment marker
//!   WrapperConf  wrapper.NAME=VALUE      comment '#'
//!   WrapperEnv   set.NAME=VALUE          comment '#'
//!
//! parse_line:  &str -> Option<Assignment>   (never fails)
//! format_line: name, value -> String        (validates the name)
//! ```
//!
//! Parsing is deliberately permissive: anything that does not match the
//! dialect's single-assignment-per-line shape is simply not an assignment.
//! Formatting is strict: a name the dialect could not read back is rejected
//! before it ever reaches a file.

use crate::error::DialectError;
use serde::{Deserialize, Serialize};

/// An assignment recognized on a single script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Variable name, without dialect decoration except where the dialect
    /// keeps it (`WrapperConf` names retain their `wrapper.` prefix).
    pub name: String,
    /// Everything after the first `=`, verbatim.
    pub value: String,
}

impl Assignment {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A script flavor the updater knows how to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// POSIX shell scripts: `NAME=VALUE`.
    Sh,
    /// Windows batch files: `set NAME=VALUE`, optional no-echo `@` prefix.
    Batch,
    /// Java service wrapper configuration: `wrapper.NAME=VALUE`, where the
    /// name itself carries the `wrapper.` prefix.
    WrapperConf,
    /// Java service wrapper environment files: `set.NAME=VALUE`.
    WrapperEnv,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Dialect {
    /// Short identifier used in logs and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sh => "sh",
            Self::Batch => "batch",
            Self::WrapperConf => "wrapper-conf",
            Self::WrapperEnv => "wrapper-env",
        }
    }

    /// The dialect's comment marker, if it has one.
    ///
    /// Batch has none: `rem` lines fail the structural check instead.
    #[must_use]
    pub const fn comment_marker(&self) -> Option<char> {
        match self {
            Self::Batch => None,
            Self::Sh | Self::WrapperConf | Self::WrapperEnv => Some('#'),
        }
    }

    /// Attempts to recognize `line` as a single variable assignment.
    ///
    /// Returns `None` for blank lines, comment lines, lines without `=` and
    /// lines missing the dialect's required prefix. The split happens at the
    /// first `=` only, so values may themselves contain `=`.
    #[must_use]
    pub fn parse_line(&self, line: &str) -> Option<Assignment> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(marker) = self.comment_marker()
            && trimmed.starts_with(marker)
        {
            return None;
        }

        let body = match self {
            Self::Sh | Self::WrapperConf => trimmed,
            Self::Batch => {
                // A leading @ suppresses echo; strip it and re-trim, since
                // arbitrary whitespace may separate the tokens.
                let no_echo = trimmed.strip_prefix('@').map_or(trimmed, str::trim_start);
                strip_keyword(no_echo, "set")?
            }
            Self::WrapperEnv => trimmed.strip_prefix("set.")?,
        };

        let (name, value) = body.split_once('=')?;
        let name = name.trim();
        if !is_plain_name(name) {
            return None;
        }
        if *self == Self::WrapperConf && !name.starts_with(WRAPPER_PREFIX) {
            return None;
        }

        Some(Assignment::new(name, value))
    }

    /// Renders one text line assigning `value` to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidName`] when the name violates the
    /// dialect's rules and [`DialectError::InvalidValue`] when the value
    /// contains a line break. Neither could survive a re-parse.
    pub fn format_line(&self, name: &str, value: &str) -> Result<String, DialectError> {
        self.validate_name(name)?;
        if value.contains(['\n', '\r']) {
            return Err(DialectError::InvalidValue {
                dialect: self.as_str().to_string(),
                name: name.to_string(),
                message: "value must not contain line breaks".to_string(),
            });
        }

        Ok(match self {
            Self::Sh | Self::WrapperConf => format!("{name}={value}"),
            Self::Batch => format!("set {name}={value}"),
            Self::WrapperEnv => format!("set.{name}={value}"),
        })
    }

    /// Checks `name` against the dialect's naming rules.
    ///
    /// # Errors
    ///
    /// Returns [`DialectError::InvalidName`] for empty names, names with
    /// embedded `=`, whitespace or control characters, and (for
    /// `WrapperConf`) names missing the `wrapper.` prefix.
    pub fn validate_name(&self, name: &str) -> Result<(), DialectError> {
        let reject = |message: &str| {
            Err(DialectError::InvalidName {
                dialect: self.as_str().to_string(),
                name: name.to_string(),
                message: message.to_string(),
            })
        };

        if name.is_empty() {
            return reject("name must not be empty");
        }
        if !is_plain_name(name) {
            return reject("name must not contain '=', whitespace or control characters");
        }
        if *self == Self::WrapperConf && !name.starts_with(WRAPPER_PREFIX) {
            return reject("name must start with 'wrapper.'");
        }

        Ok(())
    }
}

/// Required key prefix in service wrapper configuration files.
const WRAPPER_PREFIX: &str = "wrapper.";

/// A name the dialects can reproduce: non-empty, single token, no `=`.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '=' || c.is_whitespace() || c.is_control())
}

/// Strips a leading keyword followed by at least one whitespace character.
///
/// The keyword match is case-insensitive (`set`, `SET` and `Set` are all
/// common in batch files), but `setlocal` must not match.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let (head, rest) = line.split_at_checked(keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let stripped = rest.trim_start();
    if stripped.len() == rest.len() {
        // No separating whitespace: this was a longer word like "setlocal".
        return None;
    }
    Some(stripped)
}
