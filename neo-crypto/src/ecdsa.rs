// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! ECDSA over secp256r1 where the caller supplies the message digest.
//!
//! Transactions are hashed before they reach this module, so both directions
//! work on the prehash and never hash again.

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};

use crate::ecc256;

pub const ECC256_SIGN_SIZE: usize = 32 * 2;

pub trait Secp256r1Sign {
    type Sign;
    type Error;

    fn secp256r1_sign<T: AsRef<[u8]>>(&self, digest: T) -> Result<Self::Sign, Self::Error>;
}

pub trait Secp256r1Verify {
    type Error;

    fn secp256r1_verify<T: AsRef<[u8]>>(&self, digest: T, sign: &[u8]) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    #[error("ecdsa: invalid private key")]
    InvalidKey,

    #[error("ecdsa: cannot sign digest of {0} bytes")]
    InvalidDigest(usize),
}

impl Secp256r1Sign for ecc256::PrivateKey {
    type Sign = [u8; ECC256_SIGN_SIZE];
    type Error = SignError;

    fn secp256r1_sign<T: AsRef<[u8]>>(&self, digest: T) -> Result<Self::Sign, Self::Error> {
        let digest = digest.as_ref();
        let sk: SigningKey = p256::SecretKey::from_slice(self.as_be_bytes())
            .map(|key| key.into())
            .map_err(|_err| SignError::InvalidKey)?;

        // RFC 6979 deterministic nonce
        let sign: Signature = sk
            .sign_prehash(digest)
            .map_err(|_err| SignError::InvalidDigest(digest.len()))?;

        let mut buf = [0u8; ECC256_SIGN_SIZE];
        buf.copy_from_slice(sign.to_bytes().as_slice()); // r || s, big endian
        Ok(buf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("ecdsa: invalid public key")]
    InvalidKey,

    #[error("ecdsa: invalid sign")]
    InvalidSign,
}

impl Secp256r1Verify for ecc256::PublicKey {
    type Error = VerifyError;

    fn secp256r1_verify<T: AsRef<[u8]>>(&self, digest: T, sign: &[u8]) -> Result<(), Self::Error> {
        let sign = Signature::try_from(sign).map_err(|_err| VerifyError::InvalidSign)?;
        VerifyingKey::from_sec1_bytes(&self.to_uncompressed())
            .map_err(|_err| VerifyError::InvalidKey)?
            .verify_prehash(digest.as_ref(), &sign)
            .map_err(|_err| VerifyError::InvalidSign)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use neo_base::hash::Sha256;

    use super::*;
    use crate::ecc256::{Keypair, PrivateKey};

    fn keypair() -> Keypair {
        let private = PrivateKey::new(hex!(
            "c0d97e2484b40e4a6f9cb471545973d635e495e1a469176d0604bdc62c441e1b"
        ));
        Keypair::from_private(private).unwrap()
    }

    #[test]
    fn sign_verify_prehash() {
        let keypair = keypair();
        let digest = b"neo legacy transaction".sha256();

        let sign = keypair.private_key.secp256r1_sign(digest).unwrap();
        keypair.public_key.secp256r1_verify(digest, &sign).unwrap();

        // deterministic nonce
        assert_eq!(sign, keypair.private_key.secp256r1_sign(digest).unwrap());
    }

    #[test]
    fn tampered_inputs_fail() {
        let keypair = keypair();
        let digest = b"neo".sha256();
        let sign = keypair.private_key.secp256r1_sign(digest).unwrap();

        let mut other = digest;
        other[0] ^= 0x01;
        assert_eq!(
            keypair.public_key.secp256r1_verify(other, &sign),
            Err(VerifyError::InvalidSign)
        );

        let mut bad = sign;
        bad[63] ^= 0x80;
        assert_eq!(
            keypair.public_key.secp256r1_verify(digest, &bad),
            Err(VerifyError::InvalidSign)
        );

        assert_eq!(
            keypair.public_key.secp256r1_verify(digest, &sign[..63]),
            Err(VerifyError::InvalidSign)
        );
    }

    #[test]
    fn short_digest_rejected() {
        let keypair = keypair();
        assert_eq!(
            keypair.private_key.secp256r1_sign([0u8; 4]),
            Err(SignError::InvalidDigest(4))
        );
    }
}
