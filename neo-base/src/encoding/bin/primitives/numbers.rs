// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use super::super::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};

macro_rules! impl_int {
    ($ty:ty, $write:ident, $read:ident) => {
        impl NeoEncode for $ty {
            #[inline]
            fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
                writer.$write(*self);
            }
        }

        impl NeoDecode for $ty {
            #[inline]
            fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
                reader.$read()
            }
        }
    };
}

impl_int!(u8, write_u8, read_u8);
impl_int!(u16, write_u16, read_u16);
impl_int!(u32, write_u32, read_u32);
impl_int!(u64, write_u64, read_u64);

impl<const N: usize> NeoEncode for [u8; N] {
    #[inline]
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_bytes(self.as_slice());
    }
}

impl<const N: usize> NeoDecode for [u8; N] {
    #[inline]
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        reader.read_array()
    }
}
