// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Whole-transaction wire format:
//! `type ‖ version ‖ [n]attributes ‖ [n]inputs ‖ [n]outputs [‖ [n]scripts]`,
//! where every `[n]` is a single count byte.

use std::fmt::{self, Display, Formatter};

use neo_base::encoding::bin::{NeoDecode, NeoEncode, NeoRead, NeoWrite, SliceReader};
use neo_base::encoding::ToRevHex;
use neo_base::hash::{Sha256, Sha256Twice, HASH256_SIZE};
use tracing::debug;

use crate::address::AddressCodec;
use crate::attribute::{Attribute, TxAttribute};
use crate::error::{ListKind, Malformed, TxError, TxField};
use crate::input::{TxIn, Vin};
use crate::output::{TxOut, Vout};
use crate::script::TxScript;

pub const DEFAULT_TX_VERSION: u8 = 0;

/// Every list in the wire format is prefixed by one count byte.
pub const MAX_LIST_ENTRIES: usize = u8::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionType {
    Miner = 0x00,
    Issue = 0x02,
    Claim = 0x03,
    DataFile = 0x12,
    Destroy = 0x18,
    Enrollment = 0x20,
    Register = 0x40,
    Contract = 0x80,
    Record = 0x81,
    State = 0x90,
    StateUpdater = 0x91,
    Publish = 0xd0,
    Invocation = 0xd1,
}

impl TransactionType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Miner => "MinerTransaction",
            Self::Issue => "IssueTransaction",
            Self::Claim => "ClaimTransaction",
            Self::DataFile => "DataFile",
            Self::Destroy => "DestroyTransaction",
            Self::Enrollment => "EnrollmentTransaction",
            Self::Register => "RegisterTransaction",
            Self::Contract => "ContractTransaction",
            Self::Record => "RecordTransaction",
            Self::State => "StateTransaction",
            Self::StateUpdater => "StateUpdaterTransaction",
            Self::Publish => "PublishTransaction",
            Self::Invocation => "InvocationTransaction",
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = TxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Self::Miner),
            0x02 => Ok(Self::Issue),
            0x03 => Ok(Self::Claim),
            0x12 => Ok(Self::DataFile),
            0x18 => Ok(Self::Destroy),
            0x20 => Ok(Self::Enrollment),
            0x40 => Ok(Self::Register),
            0x80 => Ok(Self::Contract),
            0x81 => Ok(Self::Record),
            0x90 => Ok(Self::State),
            0x91 => Ok(Self::StateUpdater),
            0xd0 => Ok(Self::Publish),
            0xd1 => Ok(Self::Invocation),
            _ => Err(TxError::UnknownTransactionType(value)),
        }
    }
}

/// The trailing script section.
///
/// `Unset` writes nothing, `Empty` writes a zero count byte. The signable bytes of a
/// transaction are always its `Unset` encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Scripts {
    #[default]
    Unset,
    Empty,
    Populated(Vec<TxScript>),
}

impl Scripts {
    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[inline]
    pub fn as_slice(&self) -> &[TxScript] {
        match self {
            Self::Populated(scripts) => scripts,
            _ => &[],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn from_vec(scripts: Vec<TxScript>) -> Self {
        if scripts.is_empty() {
            Self::Empty
        } else {
            Self::Populated(scripts)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    tx_type: u8,
    version: u8,
    attributes: Vec<TxAttribute>,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
    scripts: Scripts,
}

impl Transaction {
    pub fn new(
        tx_type: u8,
        version: u8,
        attributes: Vec<TxAttribute>,
        inputs: Vec<TxIn>,
        outputs: Vec<TxOut>,
        scripts: Scripts,
    ) -> Result<Self, TxError> {
        if inputs.is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Inputs));
        }
        if outputs.is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Outputs));
        }

        check_entries("attributes", attributes.len())?;
        check_entries("inputs", inputs.len())?;
        check_entries("outputs", outputs.len())?;
        check_entries("scripts", scripts.len())?;

        // a present but pairless section is `Empty`, never `Populated(vec![])`
        let scripts = match scripts {
            Scripts::Populated(scripts) => Scripts::from_vec(scripts),
            scripts => scripts,
        };
        Ok(Self { tx_type, version, attributes, inputs, outputs, scripts })
    }

    /// Builds an unsigned transaction with the default version and no script section.
    pub fn build_empty<C: AddressCodec + ?Sized>(
        tx_type: TransactionType,
        vins: &[Vin],
        vouts: &[Vout],
        attrs: &[Attribute],
        codec: &C,
    ) -> Result<Self, TxError> {
        if vins.is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Inputs));
        }
        if vouts.is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Outputs));
        }

        let inputs = vins.iter().map(TxIn::from_vin).collect::<Result<Vec<_>, _>>()?;
        let outputs = vouts
            .iter()
            .map(|vout| TxOut::from_vout(vout, codec))
            .collect::<Result<Vec<_>, _>>()?;
        let attributes = attrs
            .iter()
            .map(TxAttribute::from_attribute)
            .collect::<Result<Vec<_>, _>>()?;

        let tx = Self::new(
            tx_type as u8,
            DEFAULT_TX_VERSION,
            attributes,
            inputs,
            outputs,
            Scripts::Unset,
        )?;
        debug!(
            tx_type = tx_type.name(),
            inputs = vins.len(),
            outputs = vouts.len(),
            "built unsigned transaction"
        );
        Ok(tx)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TxError> {
        let mut r = SliceReader::new(bytes);
        let tx_type = r.read_u8().map_err(|err| TxError::malformed(TxField::Type, err))?;
        let version = r.read_u8().map_err(|err| TxError::malformed(TxField::Version, err))?;

        let count = r.read_u8().map_err(|err| TxError::malformed(TxField::Attribute(0), err))?;
        let attributes = (0..count as usize)
            .map(|index| {
                TxAttribute::decode_from(&mut r)
                    .map_err(|err| TxError::malformed(TxField::Attribute(index), err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let inputs: Vec<TxIn> = decode_list(&mut r, TxField::Input)?;
        let outputs: Vec<TxOut> = decode_list(&mut r, TxField::Output)?;

        let scripts = if r.is_exhausted() {
            Scripts::Unset
        } else {
            let count = r.read_u8().map_err(|err| TxError::malformed(TxField::Script(0), err))?;
            let scripts = (0..count as usize)
                .map(|index| {
                    TxScript::decode_from(&mut r)
                        .map_err(|err| TxError::malformed(TxField::Script(index), err))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Scripts::from_vec(scripts)
        };

        if !r.is_exhausted() {
            let reason = Malformed::TrailingBytes(r.remaining());
            return Err(TxError::malformed(TxField::Trailing, reason));
        }

        debug!(tx_type, size = bytes.len(), scripts = scripts.len(), "decoded transaction");
        Ok(Self { tx_type, version, attributes, inputs, outputs, scripts })
    }

    /// The raw type byte, kept as decoded so unknown types round-trip.
    #[inline]
    pub fn tx_type(&self) -> u8 {
        self.tx_type
    }

    #[inline]
    pub fn transaction_type(&self) -> Result<TransactionType, TxError> {
        TransactionType::try_from(self.tx_type)
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn attributes(&self) -> &[TxAttribute] {
        &self.attributes
    }

    #[inline]
    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    #[inline]
    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    #[inline]
    pub fn scripts(&self) -> &Scripts {
        &self.scripts
    }

    #[inline]
    pub fn script(&self, index: usize) -> Option<&TxScript> {
        self.scripts.as_slice().get(index)
    }

    /// Marks the script section present without any pairs.
    pub fn clear_scripts(&mut self) {
        self.scripts = Scripts::Empty;
    }

    /// Drops the script section entirely.
    pub fn unset_scripts(&mut self) {
        self.scripts = Scripts::Unset;
    }

    /// Appends all of `scripts` or none of them.
    pub(crate) fn append_scripts(&mut self, scripts: Vec<TxScript>) -> Result<(), TxError> {
        let total = self.scripts.len() + scripts.len();
        check_entries("scripts", total)?;

        let mut all = Vec::with_capacity(total);
        all.extend_from_slice(self.scripts.as_slice());
        all.extend(scripts);
        self.scripts = Scripts::from_vec(all);
        Ok(())
    }

    #[inline]
    pub fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }

    /// The encoding with the script section stripped.
    pub fn unsigned_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_unsigned(&mut buf);
        buf
    }

    /// SHA-256 over `unsigned_bytes`, the digest every signer signs.
    #[inline]
    pub fn signable_hash(&self) -> [u8; HASH256_SIZE] {
        self.unsigned_bytes().sha256()
    }

    /// Display order hex of the double SHA-256 over `unsigned_bytes`.
    #[inline]
    pub fn txid(&self) -> String {
        self.unsigned_bytes().sha256_twice().to_rev_hex_lower()
    }

    fn encode_unsigned<W: NeoWrite>(&self, w: &mut W) {
        w.write_u8(self.tx_type);
        w.write_u8(self.version);
        encode_list(w, &self.attributes);
        encode_list(w, &self.inputs);
        encode_list(w, &self.outputs);
    }
}

impl NeoEncode for Transaction {
    fn neo_encode<W: NeoWrite>(&self, w: &mut W) {
        self.encode_unsigned(w);
        if !self.scripts.is_unset() {
            encode_list(w, self.scripts.as_slice());
        }
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match TransactionType::try_from(self.tx_type) {
            Ok(tx_type) => write!(f, "{{ type: {}, ", tx_type.name())?,
            Err(_) => write!(f, "{{ type: 0x{:02x}, ", self.tx_type)?,
        }
        write!(f, "version: {}, attributes: [", self.version)?;
        write_joined(f, &self.attributes)?;
        f.write_str("], inputs: [")?;
        write_joined(f, &self.inputs)?;
        f.write_str("], outputs: [")?;
        write_joined(f, &self.outputs)?;
        match &self.scripts {
            Scripts::Unset => f.write_str("], scripts: unset }"),
            scripts => write!(f, "], scripts: {} }}", scripts.len()),
        }
    }
}

fn write_joined<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[inline]
fn check_entries(field: &'static str, count: usize) -> Result<(), TxError> {
    if count > MAX_LIST_ENTRIES {
        return Err(TxError::TooManyEntries { field, count });
    }
    Ok(())
}

fn encode_list<W: NeoWrite, T: NeoEncode>(w: &mut W, items: &[T]) {
    w.write_u8(items.len() as u8);
    items.iter().for_each(|item| item.neo_encode(w));
}

/// Inputs and outputs require at least one entry.
fn decode_list<T: NeoDecode, R: NeoRead>(
    r: &mut R,
    field: fn(usize) -> TxField,
) -> Result<Vec<T>, TxError> {
    let count = r.read_u8().map_err(|err| TxError::malformed(field(0), err))?;
    if count == 0 {
        return Err(TxError::malformed(field(0), Malformed::ZeroCount));
    }

    (0..count as usize)
        .map(|index| T::neo_decode(r).map_err(|err| TxError::malformed(field(index), err)))
        .collect()
}
