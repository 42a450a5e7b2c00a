//! JSON envelopes exchanged with the agent API.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum length of the `assetLogin` the platform assigns.
pub const MAX_ASSET_LOGIN_LEN: usize = 128;
/// Maximum length of the `assetId` the platform assigns.
pub const MAX_ASSET_ID_LEN: usize = 64;
/// Maximum length of a metric or attribute code in a decoded response.
pub const MAX_CODE_LEN: usize = 64;
/// Maximum length of an attribute value in a decoded response.
pub const MAX_VALUE_LEN: usize = 128;
/// Maximum number of attributes decoded into [`AssetInfo`].
pub const MAX_ATTRIBUTES: usize = 16;

/// One batch of telemetry. The API expects a JSON array of these.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricMessage<'a> {
    pub metrics: &'a [Metric<'a>],
}

/// Readings for one metric code.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric<'a> {
    pub metric_code: &'a str,
    pub values: &'a [MetricValue<'a>],
}

impl<'a> Metric<'a> {
    pub fn new(metric_code: &'a str, values: &'a [MetricValue<'a>]) -> Self {
        Self {
            metric_code,
            values,
        }
    }
}

/// A raw reading, which may carry a unit symbol (`"45C"`).
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricValue<'a> {
    pub metric_value: &'a str,
}

impl<'a> MetricValue<'a> {
    pub fn new(metric_value: &'a str) -> Self {
        Self { metric_value }
    }
}

/// A configuration value. The API expects a JSON array of these.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute<'a> {
    pub attribute_code: &'a str,
    pub attribute_value: &'a str,
}

impl<'a> Attribute<'a> {
    pub fn new(attribute_code: &'a str, attribute_value: &'a str) -> Self {
        Self {
            attribute_code,
            attribute_value,
        }
    }
}

/// Body of `POST /agentapi/registration`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest<'a> {
    pub api_key: &'a str,
    pub sr_no: &'a str,
    pub asset_name: &'a str,
    /// Sent as `null` when the asset has no type code.
    pub asset_type_code: Option<&'a str>,
}

/// Every agent API response wraps its payload in `{"result": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

/// Credentials the platform assigns on registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub asset_login: String<MAX_ASSET_LOGIN_LEN>,
    pub asset_id: String<MAX_ASSET_ID_LEN>,
}

/// An attribute as stored by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeEntry {
    pub attribute_code: String<MAX_CODE_LEN>,
    pub attribute_value: String<MAX_VALUE_LEN>,
}

/// The subset of `GET /agentapi/assets/{assetId}` this crate understands.
///
/// Everything is optional since the platform returns different properties per
/// asset type; decode into your own type with
/// [`get_asset_info`](super::get_asset_info) when you need more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    #[serde(default)]
    pub asset_id: Option<String<MAX_ASSET_ID_LEN>>,
    #[serde(default)]
    pub sr_no: Option<String<MAX_CODE_LEN>>,
    #[serde(default)]
    pub asset_name: Option<String<MAX_CODE_LEN>>,
    #[serde(default)]
    pub asset_type_code: Option<String<MAX_CODE_LEN>>,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry, MAX_ATTRIBUTES>,
}

impl AssetInfo {
    /// Value of the attribute named `code`, if the platform returned it.
    pub fn attribute(&self, code: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.attribute_code.as_str() == code)
            .map(|a| a.attribute_value.as_str())
    }
}
