//! Source inventory extraction
//!
//! Skims JavaScript/TypeScript MCP server source for registration calls:
//! - **discover** - candidate file walk
//! - **signature** - table of recognized call shapes
//! - **scanner** - whitespace, comment, string, and bracket helpers
//! - **extract** - per-file declaration extraction
//! - **schema** - shallow input-schema inference
//! - **inventory** - entry types and cross-file merge
//! - **local** - analysis of a local directory

pub mod discover;
pub mod extract;
pub mod inventory;
pub mod local;
pub mod scanner;
pub mod schema;
pub mod signature;

pub use discover::SourceFiles;
pub use extract::{Extractor, SkippedFile, SourceFile};
pub use inventory::{
    FileExtraction, Inventory, InventoryBuilder, PromptEntry, ResourceEntry, Summary, ToolEntry,
    ToolMatch,
};
pub use local::{analyze_local, Analysis};
pub use schema::{FieldType, InputSchema};
pub use signature::{ArgumentShape, Capability, Signature, SIGNATURES};
