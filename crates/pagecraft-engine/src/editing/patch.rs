use crate::editing::block::BlockId;

/// Why a command left the editor untouched.
///
/// None of these are errors: callers that care can inspect the reason,
/// everyone else treats the command as a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    ReadOnly,
    UnknownBlock,
    LastBlock,
    IndexOutOfRange,
    NotEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub outcome: Outcome,
    /// Focused block after the command; the presentation layer moves input focus here
    pub active_block: Option<BlockId>,
    pub version: u64,
}

impl Patch {
    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }
}
