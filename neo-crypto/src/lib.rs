// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

pub mod ecc256;
pub mod ecdsa;

pub use ecc256::{KeyError, Keypair, PrivateKey, PublicKey, KEY_SIZE};
pub use ecdsa::{Secp256r1Sign, Secp256r1Verify, SignError, VerifyError, ECC256_SIGN_SIZE};
