// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory representation of a script and the merge algorithm.
//!
//! # Architecture
//!
//! ```text
//! ScriptIndex: Vec<Line> in file order
//!   Line: text + Terminator (Lf/CrLf/Cr/Unterminated) + Option<Assignment>
//!   parse: one linear pass, terminators preserved exactly
//!
//! merge(index, UpdateSet, MergeOptions) -> ScriptIndex
//!   rewrite first occurrence in place, drop removed names,
//!   append new names in set order, pass everything else through
//! ```
//!
//! A `ScriptIndex` is built fresh for every update, mutated in memory and
//! discarded after write-back; it carries no identity across calls.

pub mod index;
pub mod merge;
pub mod types;

pub use index::ScriptIndex;
pub use merge::merge;
pub use types::{Line, MergeOptions, NameValuePair, Terminator, UpdateSet};

#[cfg(test)]
mod tests;
