// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Types for script lines and desired updates.
//!
//! ```text
//! Terminator: Lf | CrLf | Cr | Unterminated (last line without newline)
//! Line: text + terminator + Option<Assignment>
//! NameValuePair: value None => remove the variable
//! UpdateSet: insertion-ordered, unique names (re-insert keeps position)
//! ```

use crate::dialect::Assignment;
use bon::Builder;
use serde::{Deserialize, Serialize};

/// Line terminator of one raw line, preserved exactly on write-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Bare `\r` (classic Mac line endings).
    Cr,
    /// The final line of a file that does not end with a newline.
    Unterminated,
}

impl Terminator {
    /// The terminator's textual form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Unterminated => "",
        }
    }
}

/// One raw line of a script: content, terminator and the parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    terminator: Terminator,
    assignment: Option<Assignment>,
}

impl Line {
    pub(crate) fn new(
        text: impl Into<String>,
        terminator: Terminator,
        assignment: Option<Assignment>,
    ) -> Self {
        Self {
            text: text.into(),
            terminator,
            assignment,
        }
    }

    /// Line content without its terminator.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn terminator(&self) -> Terminator {
        self.terminator
    }

    /// The assignment recognized on this line, if any.
    ///
    /// `None` means the line is passthrough: it is reproduced verbatim by
    /// every update.
    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    pub(crate) const fn set_terminator(&mut self, terminator: Terminator) {
        self.terminator = terminator;
    }
}

/// A desired change to one variable: set it, or remove it (`value: None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: Option<String>,
}

impl NameValuePair {
    /// A pair that sets `name` to `value`.
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// A pair that removes `name` from the script.
    pub fn unset(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// The set of variable changes to apply to one script.
///
/// Names are unique; inserting a name again replaces its value but keeps
/// its original position, so iteration order is insertion order. That order
/// decides where newly introduced variables are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSet {
    pairs: Vec<NameValuePair>,
}

impl UpdateSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Queues setting `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(NameValuePair::set(name, value));
        self
    }

    /// Queues removal of `name`.
    pub fn unset(&mut self, name: impl Into<String>) -> &mut Self {
        self.insert(NameValuePair::unset(name));
        self
    }

    /// Inserts a pair, replacing the value of an already queued name in
    /// place.
    pub fn insert(&mut self, pair: NameValuePair) -> &mut Self {
        match self.pairs.iter_mut().find(|p| p.name == pair.name) {
            Some(existing) => existing.value = pair.value,
            None => self.pairs.push(pair),
        }
        self
    }

    /// Looks a queued pair up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NameValuePair> {
        self.pairs.iter().find(|p| p.name == name)
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NameValuePair> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<NameValuePair> for UpdateSet {
    fn from_iter<I: IntoIterator<Item = NameValuePair>>(iter: I) -> Self {
        let mut set = Self::new();
        for pair in iter {
            set.insert(pair);
        }
        set
    }
}

impl<'a> IntoIterator for &'a UpdateSet {
    type Item = &'a NameValuePair;
    type IntoIter = std::slice::Iter<'a, NameValuePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Options controlling a merge.
#[derive(Debug, Clone, Builder)]
pub struct MergeOptions {
    /// Remove every recognized assignment whose name is not in the update
    /// set, so the script converges on exactly the requested variables.
    #[builder(setters(name = with_prune_missing), default = false)]
    prune_missing: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MergeOptions {
    #[must_use]
    pub const fn prune_missing(&self) -> bool {
        self.prune_missing
    }
}
