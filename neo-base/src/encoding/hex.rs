// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

pub use hex::{FromHex, FromHexError};

pub trait ToHex {
    fn to_hex_lower(&self) -> String;

    fn to_hex_upper(&self) -> String;
}

impl<T: AsRef<[u8]>> ToHex for T {
    #[inline]
    fn to_hex_lower(&self) -> String {
        hex::encode(self)
    }

    #[inline]
    fn to_hex_upper(&self) -> String {
        hex::encode_upper(self)
    }
}

/// Hex in display order for values that are stored byte-reversed on the wire,
/// e.g. transaction ids and asset ids.
pub trait ToRevHex {
    fn to_rev_hex_lower(&self) -> String;
}

impl<T: AsRef<[u8]>> ToRevHex for T {
    #[inline]
    fn to_rev_hex_lower(&self) -> String {
        const TABLE: &[u8; 16] = b"0123456789abcdef";

        let data = self.as_ref();
        let mut h = String::with_capacity(data.len() * 2);
        data.iter().rev().for_each(|b| {
            h.push(TABLE[(b >> 4) as usize] as char);
            h.push(TABLE[(b & 0x0F) as usize] as char);
        });
        h
    }
}

/// Parses display-order hex into wire-order bytes.
pub trait FromRevHex: Sized {
    fn from_rev_hex<T: AsRef<str>>(src: T) -> Result<Self, FromHexError>;
}

impl FromRevHex for Vec<u8> {
    fn from_rev_hex<T: AsRef<str>>(src: T) -> Result<Self, FromHexError> {
        let mut buf = Vec::from_hex(trim_0x(src.as_ref()))?;
        buf.reverse();
        Ok(buf)
    }
}

impl<const N: usize> FromRevHex for [u8; N] {
    fn from_rev_hex<T: AsRef<str>>(src: T) -> Result<Self, FromHexError> {
        let mut buf = [0u8; N];
        hex::decode_to_slice(trim_0x(src.as_ref()), &mut buf)?;
        buf.reverse();
        Ok(buf)
    }
}

pub trait StartsWith0x {
    fn starts_with_0x(&self) -> bool;
}

impl<T: AsRef<[u8]>> StartsWith0x for T {
    #[inline]
    fn starts_with_0x(&self) -> bool {
        let v = self.as_ref();
        v.starts_with(b"0x") || v.starts_with(b"0X")
    }
}

/// Strips an optional `0x`/`0X` prefix.
#[inline]
pub fn trim_0x(src: &str) -> &str {
    if src.starts_with_0x() {
        &src[2..]
    } else {
        src
    }
}
