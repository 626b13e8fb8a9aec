// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use sha2::Digest;

pub const HASH160_SIZE: usize = 20;
pub const HASH256_SIZE: usize = 32;

pub trait Sha256 {
    fn sha256(&self) -> [u8; HASH256_SIZE];
}

impl<T: AsRef<[u8]>> Sha256 for T {
    #[inline]
    fn sha256(&self) -> [u8; HASH256_SIZE] {
        let mut h = sha2::Sha256::new();
        h.update(self);
        h.finalize().into()
    }
}

pub trait Sha256Twice {
    fn sha256_twice(&self) -> [u8; HASH256_SIZE];
}

impl<T: AsRef<[u8]>> Sha256Twice for T {
    #[inline]
    fn sha256_twice(&self) -> [u8; HASH256_SIZE] {
        self.sha256().sha256()
    }
}

pub trait Ripemd160 {
    fn ripemd160(&self) -> [u8; HASH160_SIZE];
}

impl<T: AsRef<[u8]>> Ripemd160 for T {
    #[inline]
    fn ripemd160(&self) -> [u8; HASH160_SIZE] {
        let mut h = ripemd::Ripemd160::new();
        h.update(self);
        h.finalize().into()
    }
}

/// RIPEMD-160 over SHA-256, the script hash behind every address.
#[inline]
pub fn hash160<T: AsRef<[u8]>>(data: T) -> [u8; HASH160_SIZE] {
    data.sha256().ripemd160()
}

#[cfg(test)]
mod test {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_sha256() {
        assert_eq!(
            b"abc".sha256(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn test_ripemd160() {
        assert_eq!(b"abc".ripemd160(), hex!("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"));
    }

    #[test]
    fn test_sha256_twice() {
        assert_eq!(b"".sha256_twice(), b"".sha256().sha256());
        assert_ne!(b"".sha256_twice(), b"".sha256());
    }
}
