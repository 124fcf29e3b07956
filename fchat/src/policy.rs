//! Round limits and tool dispatch policy for chat calls.
//!
//! ```rust
//! use fchat::ChatPolicy;
//!
//! let policy = ChatPolicy::default().with_max_tool_rounds(3).sequential();
//! assert_eq!(policy.max_tool_rounds, 3);
//! assert!(!policy.parallel_tool_execution);
//! assert!(policy.validate().is_ok());
//! ```

use crate::ChatError;

pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPolicy {
    /// Tool rounds a single chat call may execute before it fails.
    pub max_tool_rounds: usize,
    /// Dispatch the calls of one round concurrently.
    pub parallel_tool_execution: bool,
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            parallel_tool_execution: true,
        }
    }
}

impl ChatPolicy {
    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel_tool_execution = false;
        self
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        if self.max_tool_rounds == 0 {
            return Err(ChatError::invalid_request(
                "max_tool_rounds must be greater than zero",
            ));
        }

        Ok(())
    }
}
