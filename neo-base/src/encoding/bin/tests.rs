// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use hex_literal::hex;

use super::*;

#[test]
fn varint_full_width_after_marker() {
    let cases: [(u64, &[u8]); 7] = [
        (0, &hex!("00")),
        (0xFC, &hex!("fc")),
        (0xFD, &hex!("fdfd00")),
        (0xFFFF, &hex!("fdffff")),
        (0x1_0000, &hex!("fe00000100")),
        (0xFFFF_FFFF, &hex!("feffffffff")),
        (0x1_0000_0000, &hex!("ff0000000001000000")),
    ];

    for (value, expected) in cases {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        assert_eq!(buf.as_slice(), expected, "value {value:#x}");
        assert_eq!(varint_size(value), expected.len());

        let mut reader = SliceReader::new(buf.as_slice());
        assert_eq!(read_varint(&mut reader).unwrap(), value);
        assert!(reader.is_exhausted());
    }
}

#[test]
fn varint_rejects_non_canonical() {
    let mut reader = SliceReader::new(&hex!("fd1000"));
    assert_eq!(read_varint(&mut reader), Err(DecodeError::InvalidVarIntTag(0xFD)));

    let mut reader = SliceReader::new(&hex!("feffff0000"));
    assert_eq!(read_varint(&mut reader), Err(DecodeError::InvalidVarIntTag(0xFE)));

    let mut reader = SliceReader::new(&hex!("ff01000000"));
    assert!(matches!(read_varint(&mut reader), Err(DecodeError::UnexpectedEof { .. })));
}

#[test]
fn little_endian_integers() {
    let mut buf = Vec::new();
    0x1234u16.neo_encode(&mut buf);
    0x0102_0304u32.neo_encode(&mut buf);
    0x0102_0304_0506_0708u64.neo_encode(&mut buf);
    assert_eq!(buf, hex!("3412 04030201 0807060504030201"));

    let mut reader = SliceReader::new(buf.as_slice());
    assert_eq!(u16::neo_decode(&mut reader).unwrap(), 0x1234);
    assert_eq!(u32::neo_decode(&mut reader).unwrap(), 0x0102_0304);
    assert_eq!(u64::neo_decode(&mut reader).unwrap(), 0x0102_0304_0506_0708);
    assert_eq!(reader.consumed(), 14);
}

#[test]
fn short_reads_report_needed_bytes() {
    let mut reader = SliceReader::new(&[1, 2, 3]);
    let err = reader.read_array::<4>().expect_err("only three bytes available");
    assert_eq!(err, DecodeError::UnexpectedEof { needed: 4, remaining: 3 });

    // a failed read leaves the cursor untouched
    assert_eq!(reader.remaining(), 3);
    assert_eq!(reader.read_bytes(3).unwrap(), vec![1, 2, 3]);
}

#[test]
fn var_bytes_respects_max() {
    let mut buf = Vec::new();
    buf.write_var_bytes(b"neo");
    assert_eq!(buf, hex!("03 6e656f"));

    let mut reader = SliceReader::new(buf.as_slice());
    assert_eq!(
        reader.read_var_bytes(2),
        Err(DecodeError::LengthOutOfRange { len: 3, max: 2 })
    );
}

proptest::proptest! {
    #[test]
    fn varint_size_matches_encoding(value in proptest::prelude::any::<u64>()) {
        let mut buf = Vec::new();
        buf.write_varint(value);
        proptest::prop_assert_eq!(buf.len(), varint_size(value));

        let mut reader = SliceReader::new(buf.as_slice());
        proptest::prop_assert_eq!(reader.read_varint(), Ok(value));
        proptest::prop_assert!(reader.is_exhausted());
    }
}
