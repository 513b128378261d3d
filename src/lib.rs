pub mod cs;
pub mod error;
pub mod ffi;

pub use cs::security;
pub use cs::security::{md4_digest, MD4_BLOCK_SIZE, MD4_OUTPUT_SIZE};
pub use error::{Error, Result};
