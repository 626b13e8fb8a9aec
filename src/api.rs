// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Hex-string entry points over the codec and the signature engine.

use neo_base::encoding::{trim_0x, FromHex, ToHex};
use neo_crypto::PrivateKey;
use tracing::warn;

use crate::address::AddressCodec;
use crate::attribute::Attribute;
use crate::error::TxError;
use crate::input::Vin;
use crate::output::Vout;
use crate::script::PUBLIC_KEY_SIZE;
use crate::signing::{self, SignaturePubkey, TxHash};
use crate::transaction::{Transaction, TransactionType};

fn decode_hex(src: &str, context: &'static str) -> Result<Vec<u8>, TxError> {
    Vec::from_hex(trim_0x(src)).map_err(|_err| TxError::InvalidHexInput { context })
}

fn decode_raw(raw: &str) -> Result<Transaction, TxError> {
    Transaction::decode(&decode_hex(raw, "raw transaction")?)
}

fn decode_public_keys(public_keys: &[&str]) -> Result<Vec<[u8; PUBLIC_KEY_SIZE]>, TxError> {
    public_keys
        .iter()
        .map(|key| {
            Vec::from_hex(trim_0x(key))
                .ok()
                .and_then(|key| <[u8; PUBLIC_KEY_SIZE]>::try_from(key.as_slice()).ok())
                .ok_or(TxError::InvalidHexInput { context: "public key" })
        })
        .collect()
}

pub fn create_empty_raw_transaction<C: AddressCodec + ?Sized>(
    codec: &C,
    tx_type: TransactionType,
    vins: &[Vin],
    vouts: &[Vout],
    attrs: &[Attribute],
) -> Result<String, TxError> {
    Transaction::build_empty(tx_type, vins, vouts, attrs, codec)
        .map(|tx| tx.encode().to_hex_lower())
}

pub fn create_raw_transaction_hashes_for_sig(raw: &str) -> Result<Vec<TxHash>, TxError> {
    decode_raw(raw).map(|tx| tx.hashes_for_sig())
}

pub fn create_raw_transaction_hashes_for_multisig(
    raw: &str,
    required: usize,
    public_keys: &[&str],
) -> Result<Vec<TxHash>, TxError> {
    let public_keys = decode_public_keys(public_keys)?;
    decode_raw(raw)?.hashes_for_multisig(required, &public_keys)
}

pub fn sign_raw_transaction(
    hash: &str,
    private_key: &PrivateKey,
) -> Result<SignaturePubkey, TxError> {
    signing::sign(&decode_hex(hash, "transaction hash")?, private_key)
}

pub fn insert_signature_into_empty_transaction(
    raw: &str,
    hashes: &[TxHash],
) -> Result<String, TxError> {
    let mut tx = decode_raw(raw)?;
    tx.insert_signatures(hashes)?;
    Ok(tx.encode().to_hex_lower())
}

pub fn signature_raw_transaction(raw: &str, signed: &[SignaturePubkey]) -> Result<String, TxError> {
    let mut tx = decode_raw(raw)?;
    tx.insert_signature_pubkeys(signed)?;
    Ok(tx.encode().to_hex_lower())
}

/// Any decode failure counts as a failed verification.
pub fn verify_raw_transaction(raw: &str) -> bool {
    match decode_raw(raw) {
        Ok(tx) => tx.verify(),
        Err(err) => {
            warn!(%err, "cannot verify raw transaction");
            false
        }
    }
}

pub fn verify_raw_multisig_transaction(raw: &str, required: usize, public_keys: &[&str]) -> bool {
    let decoded =
        decode_public_keys(public_keys).and_then(|keys| decode_raw(raw).map(|tx| (tx, keys)));
    match decoded {
        Ok((tx, keys)) => tx.verify_multisig(required, &keys),
        Err(err) => {
            warn!(%err, "cannot verify raw multisig transaction");
            false
        }
    }
}
