// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use serde::{Deserialize, Serialize};

use neo_crypto::PrivateKey;

use crate::address::{self, Base58CheckAddress, ADDRESS_VERSION, WIF_VERSION};
use crate::error::TxError;

/// Network parameters, loaded from TOML:
///
/// ```toml
/// [network]
/// address_version = 23
/// wif_version = 128
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkSettings {
    pub address_version: u8,
    pub wif_version: u8,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self { address_version: ADDRESS_VERSION, wif_version: WIF_VERSION }
    }
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self, TxError> {
        toml::from_str(content).map_err(|err| TxError::Settings(err.to_string()))
    }

    #[inline]
    pub fn address_codec(&self) -> Base58CheckAddress {
        Base58CheckAddress::new(self.network.address_version)
    }

    #[inline]
    pub fn private_key_to_wif(&self, key: &PrivateKey) -> String {
        address::private_key_to_wif(key, self.network.wif_version)
    }

    #[inline]
    pub fn wif_to_private_key(&self, wif: &str) -> Result<PrivateKey, TxError> {
        address::wif_to_private_key(wif, self.network.wif_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressCodec;

    #[test]
    fn mainnet_defaults_match() {
        let settings = Settings::default();
        assert_eq!(settings.network.address_version, 0x17);
        assert_eq!(settings.network.wif_version, 0x80);
        assert_eq!(Settings::from_toml_str(""), Ok(settings.clone()));

        let wif = "L3gau692aVdF8ESjuWKsoaew7Nu1uuRUfarf3VDc7LgkShCCkvyA";
        let key = settings.wif_to_private_key(wif).expect("wif should be ok");
        assert_eq!(settings.private_key_to_wif(&key), wif);
    }

    #[test]
    fn overrides_apply() {
        let settings = Settings::from_toml_str("[network]\naddress_version = 0x35\n")
            .expect("settings should be ok");
        assert_eq!(settings.network.address_version, 0x35);
        assert_eq!(settings.network.wif_version, 0x80);

        let codec = settings.address_codec();
        assert_eq!(codec.version(), 0x35);
        assert!(codec.encode_address(&[0u8; 20]).starts_with('N'));
    }

    #[test]
    fn invalid_settings() {
        let err = Settings::from_toml_str("[network]\naddress_version = 300\n").unwrap_err();
        assert!(matches!(err, TxError::Settings(_)));

        let err = Settings::from_toml_str("[network]\nmagic = 1\n").unwrap_err();
        assert!(matches!(err, TxError::Settings(_)));
    }
}
