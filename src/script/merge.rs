// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The merge engine: reconciles a line index against an update set.

use super::index::ScriptIndex;
use super::types::{Line, MergeOptions, Terminator, UpdateSet};
use crate::dialect::Assignment;
use crate::error::PatchResult;
use std::collections::HashSet;
use tracing::trace;

/// Produces a new index applying `updates` to `index`.
///
/// One top-to-bottom pass. The first recognized line for each updated name
/// is rewritten in place (or dropped for a removal); later duplicates of a
/// name stay verbatim. Names not found in the file are appended at the end
/// in the update set's insertion order. Passthrough lines are never touched,
/// reordered or duplicated, so applying the same set twice is idempotent.
///
/// # Errors
///
/// Returns a [`DialectError`](crate::error::DialectError) if any name in
/// `updates` violates the dialect's rules; validation runs before any output
/// is produced.
pub fn merge(
    index: &ScriptIndex,
    updates: &UpdateSet,
    options: &MergeOptions,
) -> PatchResult<ScriptIndex> {
    let dialect = index.dialect();

    // Reject bad names up front so a failed update never leaves a partial
    // result behind.
    for pair in updates {
        dialect.validate_name(&pair.name)?;
    }

    let mut satisfied: HashSet<&str> = HashSet::new();
    let mut out: Vec<Line> = Vec::with_capacity(index.len() + updates.len());

    for line in index.lines() {
        let Some(existing) = line.assignment() else {
            out.push(line.clone());
            continue;
        };

        if satisfied.contains(existing.name.as_str()) {
            // Only the first occurrence of a name is rewritten; duplicates
            // are passthrough from here on.
            out.push(line.clone());
            continue;
        }

        match updates.get(&existing.name) {
            Some(pair) => {
                satisfied.insert(pair.name.as_str());
                match &pair.value {
                    Some(value) => {
                        trace!(name = %pair.name, "rewriting assignment in place");
                        let text = dialect.format_line(&pair.name, value)?;
                        out.push(Line::new(
                            text,
                            line.terminator(),
                            Some(Assignment::new(&pair.name, value)),
                        ));
                    }
                    None => {
                        trace!(name = %pair.name, "removing assignment");
                    }
                }
            }
            None if options.prune_missing() => {
                trace!(name = %existing.name, "pruning assignment not in update set");
            }
            None => out.push(line.clone()),
        }
    }

    let pending: Vec<_> = updates
        .iter()
        .filter(|p| p.value.is_some() && !satisfied.contains(p.name.as_str()))
        .collect();

    if !pending.is_empty() {
        let terminator = index.prevailing_terminator();

        // An unterminated final line must gain a newline before anything is
        // appended after it.
        if let Some(last) = out.last_mut()
            && last.terminator() == Terminator::Unterminated
        {
            last.set_terminator(terminator);
        }

        for pair in pending {
            // Filtered on is_some above.
            let Some(value) = &pair.value else { continue };
            trace!(name = %pair.name, "appending new assignment");
            let text = dialect.format_line(&pair.name, value)?;
            out.push(Line::new(
                text,
                terminator,
                Some(Assignment::new(&pair.name, value)),
            ));
        }
    }

    Ok(ScriptIndex::from_lines(out, dialect))
}
