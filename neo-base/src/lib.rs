// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

pub mod encoding;
pub mod hash;
