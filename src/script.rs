// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! The two script shapes a single signer contributes.
//!
//! Verification: `PUSHBYTES33 ‖ compressed public key ‖ CHECKSIG`.
//! Invocation: `PUSHBYTES64 ‖ r ‖ s`.

use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::{NeoEncode, NeoRead, NeoWrite};
use neo_base::encoding::ToHex;
use neo_crypto::ECC256_SIGN_SIZE;

use crate::error::{Malformed, TxError};

pub const PUSHBYTES33: u8 = 0x21;
pub const PUSHBYTES64: u8 = 0x40;
pub const CHECKSIG: u8 = 0xac;

pub const PUBLIC_KEY_SIZE: usize = 33;
pub const VERIFICATION_SCRIPT_SIZE: usize = PUBLIC_KEY_SIZE + 2;
pub const INVOCATION_SCRIPT_SIZE: usize = ECC256_SIGN_SIZE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Invocation,
    Verification,
}

impl ScriptKind {
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Invocation => INVOCATION_SCRIPT_SIZE,
            Self::Verification => VERIFICATION_SCRIPT_SIZE,
        }
    }
}

impl Display for ScriptKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invocation => f.write_str("invocation"),
            Self::Verification => f.write_str("verification"),
        }
    }
}

/// Requires a 33-byte compressed SEC1 public key.
pub fn build_verification(public_key: &[u8]) -> Result<[u8; VERIFICATION_SCRIPT_SIZE], TxError> {
    let key: &[u8; PUBLIC_KEY_SIZE] =
        public_key.try_into().map_err(|_err| TxError::InvalidPublicKey)?;
    if key[0] != 0x02 && key[0] != 0x03 {
        return Err(TxError::InvalidPublicKey);
    }

    let mut script = [0u8; VERIFICATION_SCRIPT_SIZE];
    script[0] = PUSHBYTES33;
    script[1..=PUBLIC_KEY_SIZE].copy_from_slice(key);
    script[VERIFICATION_SCRIPT_SIZE - 1] = CHECKSIG;
    Ok(script)
}

/// The signature length is the signer's contract, it is not checked here.
pub fn build_invocation(signature: &[u8]) -> Vec<u8> {
    let mut script = Vec::with_capacity(1 + signature.len());
    script.push(PUSHBYTES64);
    script.extend_from_slice(signature);
    script
}

pub fn extract_pubkey(verification: &[u8]) -> Result<[u8; PUBLIC_KEY_SIZE], TxError> {
    if verification.len() != VERIFICATION_SCRIPT_SIZE {
        let len = verification.len();
        return Err(TxError::InvalidScript { kind: ScriptKind::Verification, len });
    }

    let mut key = [0u8; PUBLIC_KEY_SIZE];
    key.copy_from_slice(&verification[1..=PUBLIC_KEY_SIZE]);
    Ok(key)
}

pub fn extract_signature(invocation: &[u8]) -> Result<[u8; ECC256_SIGN_SIZE], TxError> {
    if invocation.len() != INVOCATION_SCRIPT_SIZE {
        return Err(TxError::InvalidScript { kind: ScriptKind::Invocation, len: invocation.len() });
    }

    let mut sign = [0u8; ECC256_SIGN_SIZE];
    sign.copy_from_slice(&invocation[1..]);
    Ok(sign)
}

/// One signer's proof pair, invocation first on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxScript {
    invocation: [u8; INVOCATION_SCRIPT_SIZE],
    verification: [u8; VERIFICATION_SCRIPT_SIZE],
}

impl TxScript {
    pub fn new(invocation: &[u8], verification: &[u8]) -> Result<Self, TxError> {
        let invocation = invocation.try_into().map_err(|_err| TxError::InvalidScript {
            kind: ScriptKind::Invocation,
            len: invocation.len(),
        })?;
        let verification = verification.try_into().map_err(|_err| TxError::InvalidScript {
            kind: ScriptKind::Verification,
            len: verification.len(),
        })?;

        let script = Self { invocation, verification };
        if let Some(Opcode { kind, offset, expected, actual }) = script.opcode_mismatch() {
            return Err(TxError::InvalidScriptOpcode { kind, offset, expected, actual });
        }
        Ok(script)
    }

    /// Builds both scripts for one signer.
    pub fn from_signature(public_key: &[u8], signature: &[u8]) -> Result<Self, TxError> {
        let verification = build_verification(public_key)?;
        Self::new(&build_invocation(signature), &verification)
    }

    #[inline]
    pub fn invocation(&self) -> &[u8] {
        &self.invocation
    }

    #[inline]
    pub fn verification(&self) -> &[u8] {
        &self.verification
    }

    #[inline]
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut key = [0u8; PUBLIC_KEY_SIZE];
        key.copy_from_slice(&self.verification[1..=PUBLIC_KEY_SIZE]);
        key
    }

    #[inline]
    pub fn signature(&self) -> [u8; ECC256_SIGN_SIZE] {
        let mut sign = [0u8; ECC256_SIGN_SIZE];
        sign.copy_from_slice(&self.invocation[1..]);
        sign
    }

    pub(crate) fn decode_from<R: NeoRead>(r: &mut R) -> Result<Self, Malformed> {
        let invocation = read_script(r, ScriptKind::Invocation)?;
        let verification = read_script(r, ScriptKind::Verification)?;

        let script = Self { invocation, verification };
        if let Some(Opcode { kind, offset, expected, actual }) = script.opcode_mismatch() {
            return Err(Malformed::ScriptOpcode { kind, offset, expected, actual });
        }
        Ok(script)
    }

    /// First opcode byte that differs from the canonical shapes.
    fn opcode_mismatch(&self) -> Option<Opcode> {
        let expected = [
            (ScriptKind::Invocation, &self.invocation[..], 0, PUSHBYTES64),
            (ScriptKind::Verification, &self.verification[..], 0, PUSHBYTES33),
            (
                ScriptKind::Verification,
                &self.verification[..],
                VERIFICATION_SCRIPT_SIZE - 1,
                CHECKSIG,
            ),
        ];
        expected
            .into_iter()
            .find(|(_, script, offset, opcode)| script[*offset] != *opcode)
            .map(|(kind, script, offset, expected)| Opcode {
                kind,
                offset,
                expected,
                actual: script[offset],
            })
    }
}

struct Opcode {
    kind: ScriptKind,
    offset: usize,
    expected: u8,
    actual: u8,
}

fn read_script<R: NeoRead, const N: usize>(
    r: &mut R,
    kind: ScriptKind,
) -> Result<[u8; N], Malformed> {
    let len = r.read_u8()?;
    if len as usize != kind.size() {
        return Err(Malformed::ScriptLength { kind, expected: kind.size() as u8, actual: len });
    }
    Ok(r.read_array()?)
}

impl NeoEncode for TxScript {
    fn neo_encode<W: NeoWrite>(&self, w: &mut W) {
        w.write_u8(INVOCATION_SCRIPT_SIZE as u8);
        w.write_bytes(&self.invocation);
        w.write_u8(VERIFICATION_SCRIPT_SIZE as u8);
        w.write_bytes(&self.verification);
    }
}

impl Display for TxScript {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ invocation: {}, verification: {} }}",
            self.invocation.to_hex_lower(),
            self.verification.to_hex_lower()
        )
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use neo_base::encoding::bin::SliceReader;

    use super::*;

    const VERIFICATION: [u8; 35] =
        hex!("21036943c02168ce22fb2e48a3f92dd72336d295e793a52633beba22ac46916dc201ac");
    const INVOCATION: [u8; 65] = hex!(
        "4077d8a721291d9c8b8d4a587735b8f8ee10d8acdd3b71fbaa49d8168d89d5a3ae"
        "ff89e360062e7048adff9b3d2a744651e46545c61286e81a7db402b2f1fc41f5"
    );

    #[test]
    fn test_extract() {
        assert_eq!(
            extract_pubkey(&VERIFICATION).expect("extract should be ok"),
            hex!("036943c02168ce22fb2e48a3f92dd72336d295e793a52633beba22ac46916dc201")
        );
        assert_eq!(extract_signature(&INVOCATION).expect("extract should be ok"), INVOCATION[1..]);

        assert_eq!(
            extract_pubkey(&VERIFICATION[..34]),
            Err(TxError::InvalidScript { kind: ScriptKind::Verification, len: 34 })
        );
        assert_eq!(
            extract_signature(&[INVOCATION.as_slice(), &[0x00]].concat()),
            Err(TxError::InvalidScript { kind: ScriptKind::Invocation, len: 66 })
        );
    }

    #[test]
    fn test_build() {
        let public_key = extract_pubkey(&VERIFICATION).expect("extract should be ok");
        assert_eq!(build_verification(&public_key), Ok(VERIFICATION));
        assert_eq!(build_invocation(&INVOCATION[1..]), INVOCATION.to_vec());

        assert_eq!(build_verification(&public_key[..32]), Err(TxError::InvalidPublicKey));
        let mut uncompressed_tag = public_key;
        uncompressed_tag[0] = 0x04;
        assert_eq!(build_verification(&uncompressed_tag), Err(TxError::InvalidPublicKey));

        // a short signature builds a short invocation, rejected when paired
        assert_eq!(build_invocation(&[0x01; 10]).len(), 11);
        assert_eq!(
            TxScript::from_signature(&public_key, &[0x01; 10]),
            Err(TxError::InvalidScript { kind: ScriptKind::Invocation, len: 11 })
        );
    }

    #[test]
    fn test_script_pair_wire() {
        let script = TxScript::new(&INVOCATION, &VERIFICATION).expect("script should be ok");
        assert_eq!(script.public_key(), VERIFICATION[1..34]);
        assert_eq!(script.signature(), INVOCATION[1..]);

        let encoded = script.to_vec();
        assert_eq!(encoded.len(), 1 + 65 + 1 + 35);
        assert_eq!(encoded[0], 0x41);
        assert_eq!(encoded[66], 0x23);

        let mut r = SliceReader::new(&encoded);
        assert_eq!(TxScript::decode_from(&mut r), Ok(script));
        assert!(r.is_exhausted());

        let mut swapped = encoded.clone();
        swapped[0] = 0x23;
        let mut r = SliceReader::new(&swapped);
        assert_eq!(
            TxScript::decode_from(&mut r),
            Err(Malformed::ScriptLength {
                kind: ScriptKind::Invocation,
                expected: 65,
                actual: 0x23,
            })
        );

        let mut r = SliceReader::new(&encoded[..100]);
        assert!(matches!(TxScript::decode_from(&mut r), Err(Malformed::Decode(_))));
    }

    #[test]
    fn test_opcodes_checked() {
        // offsets in the encoded pair: PUSHBYTES64, PUSHBYTES33, CHECKSIG
        let encoded =
            TxScript::new(&INVOCATION, &VERIFICATION).expect("script should be ok").to_vec();
        let cases = [
            (1, ScriptKind::Invocation, 0, PUSHBYTES64),
            (67, ScriptKind::Verification, 0, PUSHBYTES33),
            (101, ScriptKind::Verification, 34, CHECKSIG),
        ];
        for (at, kind, offset, expected) in cases {
            let mut zeroed = encoded.clone();
            zeroed[at] = 0x00;
            let mut r = SliceReader::new(&zeroed);
            assert_eq!(
                TxScript::decode_from(&mut r),
                Err(Malformed::ScriptOpcode { kind, offset, expected, actual: 0x00 })
            );
        }

        let mut invocation = INVOCATION;
        invocation[0] = 0x41;
        assert_eq!(
            TxScript::new(&invocation, &VERIFICATION),
            Err(TxError::InvalidScriptOpcode {
                kind: ScriptKind::Invocation,
                offset: 0,
                expected: PUSHBYTES64,
                actual: 0x41,
            })
        );

        let mut verification = VERIFICATION;
        verification[34] = 0xad;
        assert_eq!(
            TxScript::new(&INVOCATION, &verification),
            Err(TxError::InvalidScriptOpcode {
                kind: ScriptKind::Verification,
                offset: 34,
                expected: CHECKSIG,
                actual: 0xad,
            })
        );
    }
}
