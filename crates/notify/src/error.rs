// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while building or delivering a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The message could not be assembled.
    #[error("Failed to build message: {0}")]
    MessageBuild(String),

    /// The transport rejected the message or could not be reached.
    #[error("Delivery failed: {0}")]
    Transport(String),

    /// The channel has no credentials configured.
    #[error("{channel} delivery is not configured")]
    Disabled { channel: &'static str },
}
