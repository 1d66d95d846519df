// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform-specific process-group setup and signaling.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::{send_signal, setup_process_group, SignalKind};

#[cfg(not(unix))]
mod fallback;
#[cfg(not(unix))]
pub use fallback::{send_signal, setup_process_group, SignalKind};
