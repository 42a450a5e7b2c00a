//! Asset configuration (`asset.config.json`)
//!
//! Devices usually ship their platform credentials as a small JSON document:
//!
//! ```json
//! {
//!     "baseUrl": "https://sandbox.liveintersect.com/",
//!     "apiKey": "<organization api key>",
//!     "srNo": "SN-0001",
//!     "assetName": "Boiler room sensor",
//!     "assetTypeCode": "TEMP_SENSOR"
//! }
//! ```
//!
//! On targets without a file system, bundle it into the firmware image:
//!
//! ```rust,ignore
//! let config: AssetConfig = include_str!("asset.config.json").parse()?;
//! ```

use heapless::String;
use serde::{Deserialize, Serialize};

/// Maximum length of the platform base URL.
pub const MAX_BASE_URL_LEN: usize = 128;
/// Maximum length of the organization API key.
pub const MAX_API_KEY_LEN: usize = 128;
/// Maximum length of the serial number.
pub const MAX_SR_NO_LEN: usize = 64;
/// Maximum length of the asset name.
pub const MAX_ASSET_NAME_LEN: usize = 64;
/// Maximum length of the asset type code.
pub const MAX_ASSET_TYPE_CODE_LEN: usize = 64;
/// Largest config document [`AssetConfig::from_file`] accepts.
pub const MAX_CONFIG_FILE_LEN: usize = 2048;

/// Why a configuration could not be loaded.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The document is not valid JSON, lacks a required key, or a value
    /// exceeds its capacity.
    Parse,
    /// A value passed to [`AssetConfig::new`] exceeds its capacity, or the
    /// config file is larger than [`MAX_CONFIG_FILE_LEN`].
    BufferOverflow,
    /// The config file could not be read.
    #[cfg(feature = "std")]
    Io,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "invalid asset config"),
            Self::BufferOverflow => write!(f, "asset config value too long"),
            #[cfg(feature = "std")]
            Self::Io => write!(f, "cannot read asset config"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Parse => defmt::write!(f, "Parse"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            #[cfg(feature = "std")]
            Error::Io => defmt::write!(f, "Io"),
        }
    }
}

/// Connection parameters of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetConfig {
    /// Platform URL, e.g. `https://sandbox.liveintersect.com/`.
    pub base_url: String<MAX_BASE_URL_LEN>,
    /// API key representing the organization.
    pub api_key: String<MAX_API_KEY_LEN>,
    /// Hardware identifier, unique within the organization.
    pub sr_no: String<MAX_SR_NO_LEN>,
    /// User-friendly name; does not need to be unique.
    pub asset_name: String<MAX_ASSET_NAME_LEN>,
    /// Asset type configured on the platform.
    #[serde(default)]
    pub asset_type_code: Option<String<MAX_ASSET_TYPE_CODE_LEN>>,
}

impl AssetConfig {
    pub fn new(base_url: &str, api_key: &str, sr_no: &str, asset_name: &str) -> Result<Self, Error> {
        Ok(Self {
            base_url: String::try_from(base_url).map_err(|_| Error::BufferOverflow)?,
            api_key: String::try_from(api_key).map_err(|_| Error::BufferOverflow)?,
            sr_no: String::try_from(sr_no).map_err(|_| Error::BufferOverflow)?,
            asset_name: String::try_from(asset_name).map_err(|_| Error::BufferOverflow)?,
            asset_type_code: None,
        })
    }

    pub fn with_asset_type_code(mut self, code: &str) -> Result<Self, Error> {
        self.asset_type_code = Some(String::try_from(code).map_err(|_| Error::BufferOverflow)?);
        Ok(self)
    }

    /// Parses a JSON config document.
    pub fn from_slice(json: &[u8]) -> Result<Self, Error> {
        serde_json_core::from_slice::<Self>(json)
            .map(|(config, _)| config)
            .map_err(|_| Error::Parse)
    }

    /// Reads and parses a JSON config file.
    #[cfg(feature = "std")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let bytes = std::fs::read(path).map_err(|_| Error::Io)?;
        if bytes.len() > MAX_CONFIG_FILE_LEN {
            return Err(Error::BufferOverflow);
        }
        Self::from_slice(&bytes)
    }
}

impl core::str::FromStr for AssetConfig {
    type Err = Error;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        Self::from_slice(json.as_bytes())
    }
}
