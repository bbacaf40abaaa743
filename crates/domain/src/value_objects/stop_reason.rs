//! Why generation stopped

use serde::{Deserialize, Serialize};

/// Reason a completion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its turn
    EndOfTurn,
    /// The model ended a message but expects to continue (tool use)
    EndOfMessage,
    /// Generation hit the token limit
    OutOfTokens,
}
