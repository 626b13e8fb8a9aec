// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use super::{read_varint, write_varint, DecodeError};

/// All values that can be encoded into the NEO binary wire format implement this trait.
pub trait NeoEncode {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W);

    #[inline]
    fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.neo_encode(&mut buf);
        buf
    }
}

/// Values that can be decoded from the NEO binary wire format implement this trait.
pub trait NeoDecode: Sized {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError>;
}

/// Writer abstraction over the little-endian wire format.
pub trait NeoWrite {
    /// Append raw bytes to the destination buffer.
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Number of bytes written so far.
    fn bytes_written(&self) -> usize;

    #[inline]
    fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    #[inline]
    fn write_u16(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn write_u32(&mut self, value: u32) {
        self.write_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    #[inline]
    fn write_varint(&mut self, value: u64)
    where
        Self: Sized,
    {
        write_varint(self, value);
    }

    #[inline]
    fn write_var_bytes(&mut self, value: &[u8])
    where
        Self: Sized,
    {
        write_varint(self, value.len() as u64);
        self.write_bytes(value);
    }
}

impl NeoWrite for Vec<u8> {
    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    #[inline]
    fn bytes_written(&self) -> usize {
        self.len()
    }
}

/// Reader abstraction over the little-endian wire format.
pub trait NeoRead {
    /// Attempt to read exactly `buf.len()` bytes into the provided slice.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), DecodeError>;

    /// Remaining bytes that can be read from this reader.
    fn remaining(&self) -> usize;

    #[inline]
    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let mut buf = [0u8; 8];
        self.read_into(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `len` bytes into a fresh buffer.
    #[inline]
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof { needed: len, remaining: self.remaining() });
        }

        let mut buf = vec![0u8; len];
        self.read_into(buf.as_mut_slice())?;
        Ok(buf)
    }

    #[inline]
    fn read_varint(&mut self) -> Result<u64, DecodeError>
    where
        Self: Sized,
    {
        read_varint(self)
    }

    #[inline]
    fn read_var_bytes(&mut self, max: u64) -> Result<Vec<u8>, DecodeError>
    where
        Self: Sized,
    {
        let len = self.read_varint()?;
        if len > max {
            return Err(DecodeError::LengthOutOfRange { len, max });
        }

        self.read_bytes(len as usize)
    }
}
