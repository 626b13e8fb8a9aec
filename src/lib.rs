// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! # neo-legacy-tx
//!
//! Builds, encodes, signs and verifies NEO legacy (2.x) transactions.
//!
//! A transaction is assembled from caller-facing [`Vin`], [`Vout`] and [`Attribute`]
//! records, encoded to its binary wire form, hashed, and signed over secp256r1. Each
//! signer appends one invocation/verification script pair. Verification checks every
//! pair on its own, or checks all pairs together against an N-of-M policy.
//!
//! ```no_run
//! use neo_legacy_tx::{api, Settings, TransactionType, Vin, Vout, NEO_ASSET_ID};
//!
//! let settings = Settings::default();
//! let raw = api::create_empty_raw_transaction(
//!     &settings.address_codec(),
//!     TransactionType::Contract,
//!     &[Vin::new("9b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc5", 0)],
//!     &[Vout::new(NEO_ASSET_ID, "ARs51LJ8Z4C6tFihLJqHAKqMQotcCSwBTD", 1)],
//!     &[],
//! )?;
//!
//! let key = settings.wif_to_private_key("L3gau692aVdF8ESjuWKsoaew7Nu1uuRUfarf3VDc7LgkShCCkvyA")?;
//! let mut hashes = api::create_raw_transaction_hashes_for_sig(&raw)?;
//! for hash in hashes.iter_mut() {
//!     let signed = api::sign_raw_transaction(&hash.hash_hex(), &key)?;
//!     hash.fill(signed);
//! }
//!
//! let signed = api::insert_signature_into_empty_transaction(&raw, &hashes)?;
//! assert!(api::verify_raw_transaction(&signed));
//! # Ok::<(), neo_legacy_tx::TxError>(())
//! ```

pub mod address;
pub mod api;
pub mod attribute;
pub mod error;
pub mod input;
pub mod output;
pub mod script;
pub mod settings;
pub mod signing;
pub mod transaction;

pub use address::{AddressCodec, Base58CheckAddress};
pub use attribute::{Attribute, AttributeUsage, TxAttribute};
pub use error::{ListKind, Malformed, TxError, TxField};
pub use input::{TxIn, Vin};
pub use output::{TxOut, Vout, GAS_ASSET_ID, NEO_ASSET_ID};
pub use script::{
    build_invocation, build_verification, extract_pubkey, extract_signature, ScriptKind, TxScript,
};
pub use settings::Settings;
pub use signing::{sign, verify_tx_hashes, SignaturePubkey, Signers, TxHash};
pub use transaction::{Scripts, Transaction, TransactionType};
