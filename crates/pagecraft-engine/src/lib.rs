pub mod editing;
pub mod io;
pub mod models;
pub mod render;
pub mod share;

// Re-export key types for easier usage
pub use editing::{
    Block, BlockId, BlockKind, BlockType, BlockUpdate, Cmd, Document, Editor, HeadingLevel,
    Patch, Snapshot, reduce,
};
pub use models::*;
pub use share::{PublicLink, ShareTarget, share_url};
