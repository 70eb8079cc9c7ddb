// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The ordered line index of one script file.

use super::types::{Line, Terminator};
use crate::dialect::Dialect;

/// An ordered, annotated view of a script's lines.
///
/// Construction is a single linear pass over the text; every line keeps its
/// exact terminator so [`render`](Self::render) reproduces unrelated content
/// byte for byte.
#[derive(Debug, Clone)]
pub struct ScriptIndex {
    lines: Vec<Line>,
    dialect: Dialect,
}

impl ScriptIndex {
    /// An index for a file that does not exist yet.
    #[must_use]
    pub const fn empty(dialect: Dialect) -> Self {
        Self {
            lines: Vec::new(),
            dialect,
        }
    }

    /// Splits `text` into lines, preserving terminators, and annotates each
    /// line with the dialect's parse result.
    #[must_use]
    pub fn parse(text: &str, dialect: Dialect) -> Self {
        let mut lines = Vec::new();
        let bytes = text.as_bytes();
        let mut start = 0;
        let mut i = 0;

        let annotate = |content: &str, terminator: Terminator| {
            Line::new(content, terminator, dialect.parse_line(content))
        };

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(annotate(&text[start..i], Terminator::Lf));
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        lines.push(annotate(&text[start..i], Terminator::CrLf));
                        i += 2;
                    } else {
                        lines.push(annotate(&text[start..i], Terminator::Cr));
                        i += 1;
                    }
                    start = i;
                }
                _ => i += 1,
            }
        }
        if start < bytes.len() {
            lines.push(annotate(&text[start..], Terminator::Unterminated));
        }

        Self { lines, dialect }
    }

    pub(crate) const fn from_lines(lines: Vec<Line>, dialect: Dialect) -> Self {
        Self { lines, dialect }
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The terminator style used for appended lines: the last terminator
    /// present in the file, `Lf` for an empty or single unterminated line.
    #[must_use]
    pub fn prevailing_terminator(&self) -> Terminator {
        self.lines
            .iter()
            .rev()
            .map(Line::terminator)
            .find(|t| *t != Terminator::Unterminated)
            .unwrap_or(Terminator::Lf)
    }

    /// Reassembles the file contents.
    #[must_use]
    pub fn render(&self) -> String {
        let capacity = self
            .lines
            .iter()
            .map(|l| l.text().len() + l.terminator().as_str().len())
            .sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line.text());
            out.push_str(line.terminator().as_str());
        }
        out
    }
}
