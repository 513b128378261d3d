use thiserror::Error;

/// Errors produced by the digest engine and its host boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input's length in bits does not fit the 64-bit MD4 length field.
    #[error("input of {len} bytes exceeds the 2^64-bit MD4 length field")]
    InputTooLarge { len: usize },
    /// The caller handed over something that is not a byte buffer.
    #[error("No data to hash.")]
    NoData,
    /// The caller supplied no buffer to receive the digest.
    #[error("no output buffer for digest")]
    NullOutput,
}

pub type Result<T> = std::result::Result<T, Error>;
