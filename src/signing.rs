// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Signable hashes, signature insertion and verification.
//!
//! Every signer contributes its own invocation/verification pair. An N-of-M policy is
//! checked by walking the submitted signatures in order against the candidate keys with
//! a cursor that never moves back, so signatures must be submitted in the same order as
//! their keys appear among the candidates.

use neo_base::encoding::ToHex;
use neo_base::hash::HASH256_SIZE;
use neo_crypto::{PrivateKey, PublicKey, Secp256r1Sign, Secp256r1Verify};
use tracing::{debug, trace, warn};

use crate::error::{ListKind, TxError};
use crate::script::{TxScript, PUBLIC_KEY_SIZE};
use crate::transaction::Transaction;

/// A signature together with the compressed public key that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePubkey {
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
}

impl SignaturePubkey {
    pub fn new(public_key: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        Self { public_key: public_key.into(), signature: signature.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signers {
    /// Single signature, unfilled until signed.
    Normal(Option<SignaturePubkey>),

    /// `public_keys` are the M candidates in policy order. `signatures` are the
    /// submissions in the order they were collected.
    Multi {
        public_keys: Vec<[u8; PUBLIC_KEY_SIZE]>,
        signatures: Vec<SignaturePubkey>,
    },
}

/// One pending signature obligation derived from a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash {
    pub hash: [u8; HASH256_SIZE],

    /// 0 for a single signature, N for an N-of-M policy.
    pub n_required: usize,
    pub signers: Signers,
}

impl TxHash {
    #[inline]
    pub fn hash_hex(&self) -> String {
        self.hash.to_hex_lower()
    }

    #[inline]
    pub fn is_multisig(&self) -> bool {
        self.n_required > 0
    }

    /// Fills the single-signature slot, or appends a multisig submission.
    pub fn fill(&mut self, signed: SignaturePubkey) {
        match &mut self.signers {
            Signers::Normal(slot) => *slot = Some(signed),
            Signers::Multi { signatures, .. } => signatures.push(signed),
        }
    }

    pub fn verify(&self) -> bool {
        match &self.signers {
            Signers::Normal(Some(signed)) if self.n_required == 0 => {
                verify_signature(&signed.public_key, &self.hash, &signed.signature)
            }
            Signers::Normal(_) => false,
            Signers::Multi { public_keys, signatures } => {
                match_threshold(&self.hash, self.n_required, public_keys, signatures)
            }
        }
    }

    fn submissions(&self) -> Vec<&SignaturePubkey> {
        match &self.signers {
            Signers::Normal(slot) => slot.iter().collect(),
            Signers::Multi { signatures, .. } => signatures.iter().collect(),
        }
    }
}

/// Signs a 32-byte signable hash.
pub fn sign(hash: &[u8], private_key: &PrivateKey) -> Result<SignaturePubkey, TxError> {
    let public_key = private_key.public_key()?;
    let signature = private_key.secp256r1_sign(hash)?;
    debug!(public_key = %public_key.to_compressed().to_hex_lower(), "signed transaction hash");
    Ok(SignaturePubkey::new(public_key.to_compressed(), signature))
}

/// Passes iff every record passes. An empty list proves nothing and fails.
pub fn verify_tx_hashes(hashes: &[TxHash]) -> bool {
    if hashes.is_empty() {
        warn!("no signature records to verify");
        return false;
    }

    hashes.iter().enumerate().all(|(index, hash)| {
        let ok = hash.verify();
        if !ok {
            warn!(
                index,
                hash = %hash.hash_hex(),
                n_required = hash.n_required,
                "signature record rejected"
            );
        }
        ok
    })
}

fn verify_signature(public_key: &[u8], hash: &[u8], signature: &[u8]) -> bool {
    match PublicKey::from_sec1_bytes(public_key) {
        Ok(key) => key.secp256r1_verify(hash, signature).is_ok(),
        Err(_) => false,
    }
}

/// Greedy in-order matching of `required` signatures against `candidates`.
fn match_threshold(
    hash: &[u8],
    required: usize,
    candidates: &[[u8; PUBLIC_KEY_SIZE]],
    signatures: &[SignaturePubkey],
) -> bool {
    if required == 0 || required > candidates.len() || signatures.len() < required {
        trace!(
            required,
            candidates = candidates.len(),
            submitted = signatures.len(),
            "threshold unreachable"
        );
        return false;
    }

    let mut cursor = 0;
    for (position, submitted) in signatures.iter().take(required).enumerate() {
        let mut matched = false;
        while cursor < candidates.len() {
            let candidate = cursor;
            cursor += 1;
            if verify_signature(&candidates[candidate], hash, &submitted.signature) {
                trace!(position, candidate, "signature matched");
                matched = true;
                break;
            }
        }

        if !matched {
            trace!(position, "no remaining candidate matches");
            return false;
        }
    }

    true
}

impl Transaction {
    /// One single-signature record per input. Record `i` is filled from script pair `i`
    /// when that pair exists.
    pub fn hashes_for_sig(&self) -> Vec<TxHash> {
        let hash = self.signable_hash();
        (0..self.inputs().len())
            .map(|index| TxHash {
                hash,
                n_required: 0,
                signers: Signers::Normal(self.script(index).map(|script| {
                    SignaturePubkey::new(script.public_key(), script.signature())
                })),
            })
            .collect()
    }

    /// One N-of-M record per input with no submissions yet.
    pub fn hashes_for_multisig(
        &self,
        required: usize,
        public_keys: &[[u8; PUBLIC_KEY_SIZE]],
    ) -> Result<Vec<TxHash>, TxError> {
        check_policy(required, public_keys.len())?;

        let hash = self.signable_hash();
        Ok(self
            .inputs()
            .iter()
            .map(|_| TxHash {
                hash,
                n_required: required,
                signers: Signers::Multi {
                    public_keys: public_keys.to_vec(),
                    signatures: Vec::new(),
                },
            })
            .collect())
    }

    /// Appends one script pair per submitted signature, in order. Nothing is appended
    /// unless every pair builds.
    pub fn insert_signatures(&mut self, hashes: &[TxHash]) -> Result<(), TxError> {
        let mut signed = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let submissions = hash.submissions();
            if submissions.is_empty() {
                return Err(TxError::NoSignatureData);
            }
            signed.extend(submissions.into_iter().cloned());
        }

        self.insert_signature_pubkeys(&signed)
    }

    pub fn insert_signature_pubkeys(&mut self, signed: &[SignaturePubkey]) -> Result<(), TxError> {
        if signed.is_empty() {
            return Err(TxError::NoSignatureData);
        }
        if self.inputs().is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Inputs));
        }
        if self.outputs().is_empty() {
            return Err(TxError::EmptyInputOrOutputList(ListKind::Outputs));
        }

        let scripts = signed
            .iter()
            .map(|signed| TxScript::from_signature(&signed.public_key, &signed.signature))
            .collect::<Result<Vec<_>, _>>()?;

        self.append_scripts(scripts)?;
        debug!(inserted = signed.len(), scripts = self.scripts().len(), "inserted signatures");
        Ok(())
    }

    /// Single-signature verification: exactly one valid script pair per input.
    pub fn verify(&self) -> bool {
        let (pairs, inputs) = (self.scripts().len(), self.inputs().len());
        if pairs != inputs {
            warn!(txid = %self.txid(), pairs, inputs, "script pairs do not match inputs");
            return false;
        }
        verify_tx_hashes(&self.hashes_for_sig())
    }

    /// Checks the script-pair signatures, in wire order, against an N-of-M policy.
    pub fn verify_multisig(&self, required: usize, public_keys: &[[u8; PUBLIC_KEY_SIZE]]) -> bool {
        if let Err(err) = check_policy(required, public_keys.len()) {
            warn!(%err, "multisig verification rejected");
            return false;
        }

        let signatures = self
            .scripts()
            .as_slice()
            .iter()
            .map(|script| SignaturePubkey::new(script.public_key(), script.signature()))
            .collect();
        let record = TxHash {
            hash: self.signable_hash(),
            n_required: required,
            signers: Signers::Multi { public_keys: public_keys.to_vec(), signatures },
        };
        verify_tx_hashes(&[record])
    }
}

fn check_policy(required: usize, candidates: usize) -> Result<(), TxError> {
    if required == 0 || required > candidates || candidates > u8::MAX as usize {
        return Err(TxError::InvalidMultisigPolicy { required, candidates });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use neo_crypto::Keypair;

    use super::*;
    use crate::address::{AddressCodec, Base58CheckAddress};
    use crate::input::Vin;
    use crate::output::{Vout, NEO_ASSET_ID};
    use crate::transaction::TransactionType;

    const TXID: &str = "9b7cffdaa674beae0f930ebe6085af9093e5fe56b34a5c220ccdcf6efc336fc5";

    fn keypair(seed: u8) -> Keypair {
        Keypair::from_private(PrivateKey::new([seed; 32])).expect("keypair should be ok")
    }

    fn unsigned(inputs: usize) -> Transaction {
        let codec = Base58CheckAddress::default();
        let to = codec
            .address_from_public_key(&keypair(9).public_key.to_compressed())
            .expect("address should be ok");
        let vins = (0..inputs).map(|vout| Vin::new(TXID, vout as u16)).collect::<Vec<_>>();
        let vouts = [Vout::new(NEO_ASSET_ID, to, 1)];
        Transaction::build_empty(TransactionType::Contract, &vins, &vouts, &[], &codec)
            .expect("build should be ok")
    }

    #[test]
    fn test_hashes_for_unsigned() {
        let tx = unsigned(2);
        let hashes = tx.hashes_for_sig();
        assert_eq!(hashes.len(), 2);
        assert!(hashes.iter().all(|h| h.hash == tx.signable_hash() && h.n_required == 0));
        assert!(hashes.iter().all(|h| h.signers == Signers::Normal(None)));
        assert!(!verify_tx_hashes(&hashes));
        assert!(!tx.verify());
    }

    #[test]
    fn test_sign_insert_verify() {
        let mut tx = unsigned(1);
        let mut hashes = tx.hashes_for_sig();
        let signed = sign(&hashes[0].hash, &keypair(1).private_key).expect("sign should be ok");
        assert_eq!(signed.public_key, keypair(1).public_key.to_compressed());
        assert_eq!(signed.signature.len(), 64);

        hashes[0].fill(signed.clone());
        tx.insert_signatures(&hashes).expect("insert should be ok");
        assert_eq!(tx.scripts().len(), 1);
        assert!(tx.verify());

        let derived = tx.hashes_for_sig();
        assert_eq!(derived[0].signers, Signers::Normal(Some(signed)));
    }

    #[test]
    fn test_partially_signed_fails() {
        let (a, b) = (keypair(1), keypair(2));
        let tx = unsigned(2);
        let hash = tx.signable_hash();

        let mut partial = tx.clone();
        partial
            .insert_signature_pubkeys(&[sign(&hash, &a.private_key).expect("sign should be ok")])
            .expect("insert should be ok");

        let hashes = partial.hashes_for_sig();
        assert_eq!(hashes.len(), 2);
        assert!(hashes[0].verify());
        assert_eq!(hashes[1].signers, Signers::Normal(None));
        assert!(!partial.verify());

        let mut full = partial.clone();
        full.insert_signature_pubkeys(&[sign(&hash, &b.private_key).expect("sign should be ok")])
            .expect("insert should be ok");
        assert!(full.verify());

        let mut extra = full.clone();
        extra
            .insert_signature_pubkeys(&[sign(&hash, &a.private_key).expect("sign should be ok")])
            .expect("insert should be ok");
        assert_eq!(extra.scripts().len(), 3);
        assert!(!extra.verify());
    }

    #[test]
    fn test_insert_errors() {
        let mut tx = unsigned(1);
        assert_eq!(tx.insert_signatures(&[]), Err(TxError::NoSignatureData));
        assert_eq!(tx.insert_signatures(&tx.hashes_for_sig()), Err(TxError::NoSignatureData));
        assert_eq!(tx.insert_signature_pubkeys(&[]), Err(TxError::NoSignatureData));

        let good = sign(&tx.signable_hash(), &keypair(1).private_key).expect("sign should be ok");
        let bad = SignaturePubkey::new(vec![0x02; 20], good.signature.clone());
        assert_eq!(tx.insert_signature_pubkeys(&[good, bad]), Err(TxError::InvalidPublicKey));
        assert!(tx.scripts().is_unset());
    }

    #[test]
    fn test_signature_over_other_hash_fails() {
        let mut tx = unsigned(1);
        let signed = sign(&[0x42; 32], &keypair(1).private_key).expect("sign should be ok");
        tx.insert_signature_pubkeys(&[signed]).expect("insert should be ok");
        assert!(!tx.verify());
    }

    #[test]
    fn test_multisig_ordering() {
        let (a, b, c) = (keypair(1), keypair(2), keypair(3));
        let candidates = [
            a.public_key.to_compressed(),
            b.public_key.to_compressed(),
            c.public_key.to_compressed(),
        ];

        let tx = unsigned(1);
        let hash = tx.signable_hash();
        let sig_a = sign(&hash, &a.private_key).expect("sign should be ok");
        let sig_c = sign(&hash, &c.private_key).expect("sign should be ok");

        let mut in_order = tx.clone();
        in_order
            .insert_signature_pubkeys(&[sig_a.clone(), sig_c.clone()])
            .expect("insert should be ok");
        assert!(in_order.verify_multisig(2, &candidates));
        // two pairs over one input is not a single-signature transaction
        assert!(!in_order.verify());

        let mut out_of_order = tx.clone();
        out_of_order.insert_signature_pubkeys(&[sig_c, sig_a]).expect("insert should be ok");
        assert!(!out_of_order.verify_multisig(2, &candidates));

        // each pair is individually valid
        let pairs = out_of_order
            .scripts()
            .as_slice()
            .iter()
            .map(|script| {
                let signed = SignaturePubkey::new(script.public_key(), script.signature());
                TxHash { hash, n_required: 0, signers: Signers::Normal(Some(signed)) }
            })
            .collect::<Vec<_>>();
        assert!(verify_tx_hashes(&pairs));
    }

    #[test]
    fn test_multisig_records() {
        let keys: Vec<_> = (1..=3).map(keypair).collect();
        let candidates: Vec<_> = keys.iter().map(|k| k.public_key.to_compressed()).collect();

        let tx = unsigned(1);
        let mut hashes = tx.hashes_for_multisig(2, &candidates).expect("policy should be ok");
        assert_eq!(hashes.len(), 1);
        assert!(hashes[0].is_multisig());
        assert!(!verify_tx_hashes(&hashes));

        let hash = hashes[0].hash;
        hashes[0].fill(sign(&hash, &keys[1].private_key).expect("sign should be ok"));
        assert!(!verify_tx_hashes(&hashes));

        hashes[0].fill(sign(&hash, &keys[2].private_key).expect("sign should be ok"));
        assert!(verify_tx_hashes(&hashes));

        let mut signed = tx.clone();
        signed.insert_signatures(&hashes).expect("insert should be ok");
        assert_eq!(signed.scripts().len(), 2);
        assert!(signed.verify_multisig(2, &candidates));
        assert!(!signed.verify_multisig(3, &candidates));
    }

    #[test]
    fn test_multisig_policy() {
        let tx = unsigned(1);
        let candidates = [keypair(1).public_key.to_compressed()];
        assert_eq!(
            tx.hashes_for_multisig(0, &candidates),
            Err(TxError::InvalidMultisigPolicy { required: 0, candidates: 1 })
        );
        assert_eq!(
            tx.hashes_for_multisig(2, &candidates),
            Err(TxError::InvalidMultisigPolicy { required: 2, candidates: 1 })
        );
        assert!(!tx.verify_multisig(2, &candidates));
    }

    #[test]
    fn test_matching_skips_invalid_candidates() {
        let (a, b) = (keypair(1), keypair(2));
        let hash = [0x11; 32];
        let mut broken = b.public_key.to_compressed();
        broken[0] = 0x05;

        let candidates = [broken, a.public_key.to_compressed(), b.public_key.to_compressed()];
        let signatures = [
            sign(&hash, &a.private_key).expect("sign should be ok"),
            sign(&hash, &b.private_key).expect("sign should be ok"),
        ];
        assert!(match_threshold(&hash, 2, &candidates, &signatures));
        assert!(!match_threshold(&hash, 2, &candidates, &signatures[..1]));
        assert!(!match_threshold(&hash, 2, &candidates[..2], &signatures));
    }
}
