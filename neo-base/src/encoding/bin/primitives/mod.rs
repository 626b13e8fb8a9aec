// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

mod numbers;
