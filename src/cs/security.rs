pub mod md4;

// Re-export MD4 functionality
pub use md4::{md4_digest, MD4_BLOCK_SIZE, MD4_OUTPUT_SIZE};
