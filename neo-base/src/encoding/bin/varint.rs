// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Compact-length integers: values below `0xFD` take one byte, wider values
//! take a marker byte followed by the full-width little-endian value.

use super::{DecodeError, NeoRead, NeoWrite};

pub const VARINT_U16_TAG: u8 = 0xFD;
pub const VARINT_U32_TAG: u8 = 0xFE;
pub const VARINT_U64_TAG: u8 = 0xFF;

/// Encoded size in bytes of `value` as a compact-length integer.
#[inline]
pub const fn varint_size(value: u64) -> usize {
    if value < VARINT_U16_TAG as u64 {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Encodes `value` into a fixed scratch array and returns it with the used length.
#[inline]
pub fn to_varint_le(value: u64) -> ([u8; 9], usize) {
    let mut buf = [0u8; 9];
    let len = varint_size(value);
    match len {
        1 => buf[0] = value as u8,
        3 => {
            buf[0] = VARINT_U16_TAG;
            buf[1..3].copy_from_slice(&(value as u16).to_le_bytes());
        }
        5 => {
            buf[0] = VARINT_U32_TAG;
            buf[1..5].copy_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf[0] = VARINT_U64_TAG;
            buf[1..9].copy_from_slice(&value.to_le_bytes());
        }
    }
    (buf, len)
}

#[inline]
pub fn write_varint<W: NeoWrite + ?Sized>(writer: &mut W, value: u64) {
    let (buf, len) = to_varint_le(value);
    writer.write_bytes(&buf[..len]);
}

/// Reads a compact-length integer, rejecting values that were not encoded in
/// their shortest form.
#[inline]
pub fn read_varint<R: NeoRead + ?Sized>(reader: &mut R) -> Result<u64, DecodeError> {
    let tag = reader.read_u8()?;
    match tag {
        value @ 0x00..=0xFC => Ok(value as u64),
        VARINT_U16_TAG => {
            let value = reader.read_u16()?;
            if value < VARINT_U16_TAG as u16 {
                return Err(DecodeError::InvalidVarIntTag(tag));
            }
            Ok(value as u64)
        }
        VARINT_U32_TAG => {
            let value = reader.read_u32()?;
            if value <= 0xFFFF {
                return Err(DecodeError::InvalidVarIntTag(tag));
            }
            Ok(value as u64)
        }
        VARINT_U64_TAG => {
            let value = reader.read_u64()?;
            if value <= 0xFFFF_FFFF {
                return Err(DecodeError::InvalidVarIntTag(tag));
            }
            Ok(value)
        }
    }
}
