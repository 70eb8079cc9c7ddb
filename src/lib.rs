// envscript: environment script updater
//
// SPDX-FileCopyrightText: 2026 envscript contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                update::ScriptFileUpdate
//!             read -> merge -> atomic write
//!                          |
//!               +----------+----------+
//!               v                     v
//!         script (lines)        dialect (syntax)
//!       Line / Terminator       Sh / Batch /
//!       ScriptIndex / merge     WrapperConf / WrapperEnv
//!               |                     |
//!               +----------+----------+
//!                          v
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```
//!
//! The crate rewrites `NAME=VALUE` style declarations inside existing
//! scripts while leaving every other line byte-for-byte intact: comments,
//! blank lines, ordering and line terminators all survive an update.

pub mod dialect;
pub mod error;
pub mod logging;
pub mod script;
pub mod update;

pub use dialect::Dialect;
pub use error::{PatchError, PatchResult};
pub use script::{MergeOptions, NameValuePair, UpdateSet};
pub use update::ScriptFileUpdate;
