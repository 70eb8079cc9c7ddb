// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The file I/O boundary: read, merge, atomic write-back.
//!
//! # Architecture
//!
//! ```text
//! ScriptFileUpdate::new(path, dialect)
//!   load_existing()   recognized assignments, file order, first per name
//!   update(set)       read -> merge -> temp file -> rename over target
//!
//! Missing file reads as empty (creation is implicit).
//! A failed write leaves the original file intact.
//! ```
//!
//! One invocation operates on exactly one file, synchronously. Concurrent
//! writers to the same path must be serialized by the caller.

use crate::dialect::Dialect;
use crate::error::{FsError, PatchResult};
use crate::script::{self, MergeOptions, NameValuePair, ScriptIndex, UpdateSet};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Updates environment variable declarations in one script file.
#[derive(Debug, Clone)]
pub struct ScriptFileUpdate {
    path: PathBuf,
    dialect: Dialect,
}

impl ScriptFileUpdate {
    pub fn new(path: impl Into<PathBuf>, dialect: Dialect) -> Self {
        Self {
            path: path.into(),
            dialect,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the variables currently declared in the script, in file
    /// order. Duplicate names report their first occurrence only.
    ///
    /// A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::ReadError`] if the file exists but cannot be read.
    pub fn load_existing(&self) -> PatchResult<Vec<NameValuePair>> {
        let index = self.read_index()?;

        let mut seen: HashSet<&str> = HashSet::new();
        let mut pairs = Vec::new();
        for line in index.lines() {
            if let Some(assignment) = line.assignment()
                && seen.insert(assignment.name.as_str())
            {
                pairs.push(NameValuePair::set(&assignment.name, &assignment.value));
            }
        }

        Ok(pairs)
    }

    /// Applies `updates` to the script with default [`MergeOptions`].
    ///
    /// # Errors
    ///
    /// See [`update_with`](Self::update_with).
    pub fn update(&self, updates: &UpdateSet) -> PatchResult<()> {
        self.update_with(updates, &MergeOptions::default())
    }

    /// Applies `updates` to the script.
    ///
    /// Reads the file (missing reads as empty), merges, then replaces the
    /// file atomically: the new contents go to a sibling temporary file
    /// which is renamed over the target, so a concurrent reader sees either
    /// the old file or the new one, never a partial write.
    ///
    /// # Errors
    ///
    /// Invalid names are rejected before the filesystem is touched; read and
    /// write failures surface as [`FsError`] with the path and cause, and
    /// leave the original file unmodified.
    pub fn update_with(&self, updates: &UpdateSet, options: &MergeOptions) -> PatchResult<()> {
        for pair in updates {
            self.dialect.validate_name(&pair.name)?;
        }

        let index = self.read_index()?;
        let merged = script::merge(&index, updates, options)?;
        self.replace_contents(&merged.render())?;

        debug!(
            path = %self.path.display(),
            dialect = %self.dialect,
            updates = updates.len(),
            lines = merged.len(),
            "script updated"
        );
        Ok(())
    }

    fn read_index(&self) -> PatchResult<ScriptIndex> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(ScriptIndex::parse(&text, self.dialect)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(ScriptIndex::empty(self.dialect))
            }
            Err(source) => Err(FsError::ReadError {
                path: self.path.display().to_string(),
                source,
            }
            .into()),
        }
    }

    fn replace_contents(&self, contents: &str) -> PatchResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let write_err = |source| FsError::WriteError {
            path: self.path.display().to_string(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;

        tmp.persist(&self.path).map_err(|e| FsError::PersistError {
            path: self.path.display().to_string(),
            source: e.error,
        })?;

        Ok(())
    }
}
