pub mod chunk;
pub mod context;
pub mod output;

pub use chunk::{ChunkMetadata, ContentType, RetrievedChunk, sort_by_score};
pub use context::UserContext;
pub use output::{Quality, RetrievalContext};
