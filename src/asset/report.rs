//! Asset info, telemetry and attribute reporting.

use super::message::{ApiResponse, AssetInfo, Attribute, Metric, MetricMessage, MetricValue};
use super::{ASSETS_API, ATTRIBUTES_API, Asset, Error, METRICS_API, MAX_TARGET_LEN};
use crate::network::Connect;
use crate::network::application::http::url::percent_encode;
use heapless::String;
use serde::de::DeserializeOwned;

/// Downloads the asset's properties and the attributes stored in the cloud.
pub fn get_asset_info<N: Connect>(asset: &mut Asset<N>) -> Result<AssetInfo, Error> {
    get_asset_info_as(asset)
}

/// Like [`get_asset_info`], decoding the `result` into a caller-defined type.
pub fn get_asset_info_as<T: DeserializeOwned, N: Connect>(
    asset: &mut Asset<N>,
) -> Result<T, Error> {
    if asset.asset_id().is_empty() {
        return Err(Error::NotRegistered);
    }

    let mut path: String<MAX_TARGET_LEN> = String::new();
    path.push_str(ASSETS_API).map_err(|_| Error::BufferOverflow)?;
    path.push('/').map_err(|_| Error::BufferOverflow)?;
    percent_encode(asset.asset_id(), &mut path)?;

    let response: ApiResponse<T> = asset.do_api_get(&path, &[], &[])?;
    Ok(response.result)
}

/// Sends one sensor reading.
///
/// `metric_value` is the raw value and may carry a unit symbol, e.g. `"45C"`.
pub fn post_metric<N: Connect>(
    asset: &mut Asset<N>,
    metric_code: &str,
    metric_value: &str,
) -> Result<(), Error> {
    let values = [MetricValue::new(metric_value)];
    post_metrics(asset, &[Metric::new(metric_code, &values)])
}

/// Sends readings for several metric codes in one request.
pub fn post_metrics<N: Connect>(asset: &mut Asset<N>, metrics: &[Metric<'_>]) -> Result<(), Error> {
    let message = [MetricMessage { metrics }];
    asset.post_json(METRICS_API, &message.as_slice(), &[])?;
    Ok(())
}

/// Uploads one configuration value. The platform keeps only the latest value
/// per attribute code.
pub fn post_attribute<N: Connect>(
    asset: &mut Asset<N>,
    attr_code: &str,
    attr_value: &str,
) -> Result<(), Error> {
    post_attributes(asset, &[Attribute::new(attr_code, attr_value)])
}

/// Uploads several configuration values in one request.
pub fn post_attributes<N: Connect>(
    asset: &mut Asset<N>,
    attributes: &[Attribute<'_>],
) -> Result<(), Error> {
    asset.post_json(ATTRIBUTES_API, &attributes, &[])?;
    Ok(())
}
