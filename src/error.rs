// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::DecodeError;
use neo_crypto::{KeyError, SignError};

use crate::script::ScriptKind;

/// The part of the wire format being parsed when decoding failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxField {
    Type,
    Version,
    Attribute(usize),
    Input(usize),
    Output(usize),
    Script(usize),
    Trailing,
}

impl Display for TxField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Version => f.write_str("version"),
            Self::Attribute(index) => write!(f, "attribute[{index}]"),
            Self::Input(index) => write!(f, "input[{index}]"),
            Self::Output(index) => write!(f, "output[{index}]"),
            Self::Script(index) => write!(f, "script[{index}]"),
            Self::Trailing => f.write_str("trailing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Inputs,
    Outputs,
}

impl Display for ListKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inputs => f.write_str("inputs"),
            Self::Outputs => f.write_str("outputs"),
        }
    }
}

/// Why a wire field could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("count must not be zero")]
    ZeroCount,

    #[error("unknown attribute usage 0x{0:02x}")]
    UnknownUsage(u8),

    #[error("{kind} length byte is {actual}, expected {expected}")]
    ScriptLength { kind: ScriptKind, expected: u8, actual: u8 },

    #[error("{kind} script byte {offset} is 0x{actual:02x}, expected 0x{expected:02x}")]
    ScriptOpcode { kind: ScriptKind, offset: usize, expected: u8, actual: u8 },

    #[error("{0} unexpected bytes after the last field")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TxError {
    #[error("tx: invalid hex input for {context}")]
    InvalidHexInput { context: &'static str },

    #[error("tx: malformed transaction at {field}: {reason}")]
    MalformedTransaction { field: TxField, reason: Malformed },

    #[error("tx: invalid {kind} script length {len}")]
    InvalidScript { kind: ScriptKind, len: usize },

    #[error("tx: {kind} script byte {offset} is 0x{actual:02x}, expected 0x{expected:02x}")]
    InvalidScriptOpcode { kind: ScriptKind, offset: usize, expected: u8, actual: u8 },

    #[error("tx: {0} must not be empty")]
    EmptyInputOrOutputList(ListKind),

    #[error("tx: no signature data to insert")]
    NoSignatureData,

    #[error("tx: invalid previous transaction id")]
    InvalidTxId,

    #[error("tx: invalid asset id")]
    InvalidAssetId,

    #[error("tx: invalid address '{0}'")]
    InvalidAddress(String),

    #[error("tx: unknown attribute usage 0x{0:02x}")]
    UnknownAttributeUsage(u8),

    #[error("tx: invalid data for attribute usage 0x{usage:02x}, length {len}")]
    InvalidAttributeData { usage: u8, len: usize },

    #[error("tx: unknown transaction type 0x{0:02x}")]
    UnknownTransactionType(u8),

    #[error("tx: invalid public key")]
    InvalidPublicKey,

    #[error("tx: invalid wif")]
    InvalidWif,

    #[error("tx: {count} {field} exceed the 255 entries a count byte can hold")]
    TooManyEntries { field: &'static str, count: usize },

    #[error("tx: invalid multisig policy {required} of {candidates}")]
    InvalidMultisigPolicy { required: usize, candidates: usize },

    #[error("tx: key error: {0}")]
    Key(#[from] KeyError),

    #[error("tx: sign error: {0}")]
    Signing(#[from] SignError),

    #[error("tx: settings: {0}")]
    Settings(String),
}

impl TxError {
    #[inline]
    pub(crate) fn malformed(field: TxField, reason: impl Into<Malformed>) -> Self {
        Self::MalformedTransaction { field, reason: reason.into() }
    }
}
