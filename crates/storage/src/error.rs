// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use morty_core::StateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state error: {0}")]
    State(#[from] StateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StorageError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::State(e) => e.code(),
            Self::Io(_) | Self::Serialize(_) => "PERSIST_FAILED",
        }
    }
}
