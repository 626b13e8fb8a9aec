// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Little-endian binary wire format shared by every NEO legacy record.

mod primitives;
mod reader;
mod traits;
mod varint;

pub use reader::*;
pub use traits::*;
pub use varint::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("decode: unexpected end of data, need {needed} bytes but {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("decode: non-canonical var-int with tag 0x{0:02x}")]
    InvalidVarIntTag(u8),

    #[error("decode: length {len} out of range, max {max}")]
    LengthOutOfRange { len: u64, max: u64 },
}

#[cfg(test)]
mod tests;
