// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Engine-level failures. `Validation`, `NotFound` and `State` are terminal
/// and surfaced to the caller verbatim; `Storage` wraps the underlying store
/// and propagates unchanged so retry policy stays with the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    State(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
