pub mod chunking;
pub mod index;
pub mod model;

pub use chunking::{chunk_text, ChunkWindow};
pub use index::{embed_texts, Index};
pub use model::{Candidate, IndexStatus};
