// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::fmt::{self, Debug, Formatter};

use neo_base::encoding::ToHex;
use p256::{
    elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint},
    AffinePoint, EncodedPoint, PublicKey as P256PublicKey, SecretKey as P256SecretKey,
};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

pub const KEY_SIZE: usize = 32;
pub const COMPRESSED_KEY_SIZE: usize = KEY_SIZE + 1;
pub const UNCOMPRESSED_KEY_SIZE: usize = KEY_SIZE * 2 + 1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("ecc256: invalid private key")]
    InvalidPrivateKey,

    #[error("ecc256: invalid private key length")]
    InvalidPrivateKeyLength,

    #[error("ecc256: invalid public key encoding")]
    InvalidPublicKey,
}

#[derive(Clone)]
pub struct PrivateKey {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl PrivateKey {
    #[inline]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self { key: Zeroizing::new(bytes) }
    }

    #[inline]
    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; KEY_SIZE] =
            slice.try_into().map_err(|_| KeyError::InvalidPrivateKeyLength)?;
        Ok(Self::new(bytes))
    }

    #[inline]
    pub fn as_be_bytes(&self) -> &[u8] {
        self.key.as_slice()
    }

    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        let secret = P256SecretKey::from_slice(self.as_be_bytes())
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        PublicKey::from_p256(&secret.public_key())
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"***").finish()
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key.as_slice().ct_eq(other.key.as_slice()).into()
    }
}

/// A point on secp256r1, kept in affine coordinates so both SEC1 forms are cheap.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct PublicKey {
    gx: [u8; KEY_SIZE],
    gy: [u8; KEY_SIZE],
}

impl PublicKey {
    fn from_affine(point: &AffinePoint) -> Result<Self, KeyError> {
        let encoded = point.to_encoded_point(false);
        let (Some(x), Some(y)) = (encoded.x(), encoded.y()) else {
            return Err(KeyError::InvalidPublicKey);
        };

        let mut gx = [0u8; KEY_SIZE];
        let mut gy = [0u8; KEY_SIZE];
        gx.copy_from_slice(x.as_ref());
        gy.copy_from_slice(y.as_ref());
        Ok(Self { gx, gy })
    }

    #[inline]
    fn from_p256(public: &P256PublicKey) -> Result<Self, KeyError> {
        Self::from_affine(public.as_affine())
    }

    /// Accepts compressed (33 bytes) and uncompressed (65 bytes) SEC1 encodings.
    /// A compressed key is decompressed onto the curve here.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        match (bytes.len(), bytes.first()) {
            (COMPRESSED_KEY_SIZE, Some(0x02 | 0x03)) | (UNCOMPRESSED_KEY_SIZE, Some(0x04)) => {}
            _ => return Err(KeyError::InvalidPublicKey),
        }

        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        let point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(KeyError::InvalidPublicKey)?;
        Self::from_affine(&point)
    }

    #[inline]
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_KEY_SIZE] {
        let mut buf = [0u8; UNCOMPRESSED_KEY_SIZE];
        buf[0] = 0x04;
        buf[1..33].copy_from_slice(&self.gx);
        buf[33..].copy_from_slice(&self.gy);
        buf
    }

    #[inline]
    pub fn to_compressed(&self) -> [u8; COMPRESSED_KEY_SIZE] {
        let mut buf = [0u8; COMPRESSED_KEY_SIZE];
        buf[0] = 0x02 + (self.gy[KEY_SIZE - 1] & 0x01);
        buf[1..].copy_from_slice(&self.gx);
        buf
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("compressed", &self.to_compressed().to_hex_lower())
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Keypair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl Keypair {
    #[inline]
    pub fn from_private(private_key: PrivateKey) -> Result<Self, KeyError> {
        let public_key = private_key.public_key()?;
        Ok(Self { private_key, public_key })
    }
}
