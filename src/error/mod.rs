// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            PatchError (~16 bytes)
//!                  |
//!        +---------+---------+--------+
//!        v         v         v        v
//!     Dialect     Fs        Io      Other
//!      Box       Box       Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Dialect  InvalidName, InvalidValue
//!   Fs       ReadError, WriteError, PersistError
//!
//! All variants boxed => PatchError stays pointer-sized on the stack.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PatchError`].
pub type PatchResult<T> = std::result::Result<T, PatchError>;

/// Top-level error type for script update operations.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A desired update violates the active dialect's rules.
    #[error("dialect error: {0}")]
    Dialect(#[from] Box<DialectError>),

    /// Filesystem operation failed.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error without path context.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PatchError {
                fn from(err: $error) -> Self {
                    PatchError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    DialectError => Dialect,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Dialect Errors ---

/// Dialect-level validation errors.
///
/// Raised before any file mutation: a rejected update set never touches
/// the target file.
#[derive(Debug, Error)]
pub enum DialectError {
    /// Variable name does not satisfy the dialect's naming rules.
    #[error("invalid variable name '{name}' for {dialect} dialect: {message}")]
    InvalidName {
        dialect: String,
        name: String,
        message: String,
    },

    /// Variable value cannot be expressed on a single line.
    #[error("invalid value for '{name}' in {dialect} dialect: {message}")]
    InvalidValue {
        dialect: String,
        name: String,
        message: String,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
///
/// Every variant carries the path of the script being updated; a failed
/// write leaves the original file untouched (see `update` module).
#[derive(Debug, Error)]
pub enum FsError {
    /// Failed to read the target script.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the replacement contents.
    #[error("failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to rename the temporary file over the target.
    #[error("failed to replace '{path}': {source}")]
    PersistError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
