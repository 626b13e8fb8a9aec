// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use crate::hash::Sha256Twice;

const CHECKSUM_SIZE: usize = 4;

pub trait ToBase58Check {
    fn to_base58_check(&self, prefix: Option<u8>) -> String;
}

impl<T: AsRef<[u8]>> ToBase58Check for T {
    fn to_base58_check(&self, prefix: Option<u8>) -> String {
        let src = self.as_ref();
        let mut buf = Vec::with_capacity(1 + src.len() + CHECKSUM_SIZE);

        if let Some(prefix) = prefix {
            buf.push(prefix);
        }
        buf.extend_from_slice(src);

        let check = buf.sha256_twice();
        buf.extend_from_slice(&check[..CHECKSUM_SIZE]);

        bs58::encode(buf).into_string()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum FromBase58CheckError {
    #[error("base58check: invalid base58 text: {0}")]
    InvalidBase58(String),

    #[error("base58check: invalid length")]
    InvalidLength,

    #[error("base58check: invalid checksum")]
    InvalidChecksum,

    #[error("base58check: expected prefix {0} but got {1}")]
    InvalidPrefix(u8, u8),
}

pub trait FromBase58Check: Sized {
    type Error;

    fn from_base58_check<T: AsRef<str>>(src: T, prefix: Option<u8>) -> Result<Self, Self::Error>;
}

impl FromBase58Check for Vec<u8> {
    type Error = FromBase58CheckError;

    fn from_base58_check<T: AsRef<str>>(
        src: T,
        prefix: Option<u8>,
    ) -> Result<Vec<u8>, Self::Error> {
        let min_size = if prefix.is_some() { CHECKSUM_SIZE + 2 } else { CHECKSUM_SIZE + 1 };
        let v = bs58::decode(src.as_ref())
            .into_vec()
            .map_err(|err| Self::Error::InvalidBase58(err.to_string()))?;

        if v.len() < min_size {
            return Err(Self::Error::InvalidLength);
        }

        let (payload, check) = v.split_at(v.len() - CHECKSUM_SIZE);
        if payload.sha256_twice()[..CHECKSUM_SIZE] != *check {
            return Err(Self::Error::InvalidChecksum);
        }

        match prefix {
            Some(prefix) if prefix != payload[0] => {
                Err(Self::Error::InvalidPrefix(prefix, payload[0]))
            }
            Some(_) => Ok(payload[1..].to_vec()),
            None => Ok(payload.to_vec()),
        }
    }
}
