//! # LiveIntersect asset client
//!
//! An [`Asset`] is the device-side identity on the LiveIntersect platform. It
//! is identified by its serial number (`srNo`) within the organization owning
//! the API key. Registering the asset makes the platform assign an `assetId`
//! and an `assetLogin`; from then on every request is authenticated with HTTP
//! Basic auth using the login as user name and an empty password.
//!
//! ```rust,no_run
//! use liveintersect::asset::{Asset, post_attribute, post_metric};
//! use liveintersect::config::AssetConfig;
//! # use liveintersect::network::{Close, Connect, Connection, Read, Write};
//! # struct Modem;
//! # struct Link;
//! # impl Read for Link {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Link {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for Link {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connection for Link {}
//! # impl Connect for Modem {
//! #     type Connection = Link;
//! #     type Error = liveintersect::network::error::Error;
//! #     fn connect(&mut self, _remote: &str) -> Result<Link, Self::Error> { Ok(Link) }
//! # }
//! # fn main() -> Result<(), liveintersect::asset::Error> {
//!
//! let config = AssetConfig::new("http://sandbox.liveintersect.com/", "api-key", "SN-0001", "Pump 1")?;
//! let mut asset = Asset::new(Modem, config)?;
//!
//! asset.register_asset()?;
//! post_metric(&mut asset, "temp", "45C")?;
//! post_attribute(&mut asset, "firmware", "1.2.0")?;
//! # Ok(())
//! # }
//! ```

use crate::config::AssetConfig;
use crate::network::application::http::{
    Client, Endpoint, Header, Headers, MAX_HEADER_VALUE_LEN, Method, Request, Response,
};
use crate::network::error::Error as NetworkError;
use crate::network::Connect;
use base64ct::{Base64, Encoding as B64Encoding};
use heapless::String;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod error;
pub mod message;
mod report;

pub use error::Error;
pub use message::{
    ApiResponse, AssetInfo, Attribute, AttributeEntry, Metric, MetricMessage, MetricValue,
    Registration, RegistrationRequest, MAX_ASSET_ID_LEN, MAX_ASSET_LOGIN_LEN,
};
pub use report::{
    get_asset_info, get_asset_info_as, post_attribute, post_attributes, post_metric,
    post_metrics,
};

/// Registration lookup (GET) and creation (POST).
pub const REGISTRATION_API: &str = "/agentapi/registration";
/// Asset properties, followed by `/{assetId}`.
pub const ASSETS_API: &str = "/agentapi/assets";
/// Telemetry upload.
pub const METRICS_API: &str = "/agentapi/assetmetrics";
/// Attribute upload.
pub const ATTRIBUTES_API: &str = "/agentapi/assetattributes";

/// Maximum length of a request target, query string included.
pub const MAX_TARGET_LEN: usize = 512;
/// Maximum length of a serialized JSON request body.
pub const MAX_PAYLOAD_LEN: usize = 1024;

// base64 of "<login>:"
const MAX_BASIC_CREDENTIALS_LEN: usize = (MAX_ASSET_LOGIN_LEN + 1).div_ceil(3) * 4;

/// A device registered (or about to be) with the LiveIntersect platform.
///
/// Generic over the transport, which opens one connection per request.
pub struct Asset<N: Connect> {
    network: N,
    endpoint: Endpoint,
    config: AssetConfig,
    asset_id: String<MAX_ASSET_ID_LEN>,
    asset_login: String<MAX_ASSET_LOGIN_LEN>,
}

impl<N: Connect> core::fmt::Debug for Asset<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The API key and login are credentials; keep them out of logs.
        f.debug_struct("Asset")
            .field("endpoint", &self.endpoint)
            .field("sr_no", &self.config.sr_no)
            .field("asset_id", &self.asset_id)
            .field("registered", &self.is_registered())
            .finish()
    }
}

impl<N: Connect> Asset<N> {
    /// Creates an unregistered asset. Fails when `config.base_url` is not a
    /// valid `http(s)://` URL.
    pub fn new(network: N, config: AssetConfig) -> Result<Self, Error> {
        let endpoint = Endpoint::parse(&config.base_url).map_err(|_| Error::InvalidUrl)?;
        Ok(Self {
            network,
            endpoint,
            config,
            asset_id: String::new(),
            asset_login: String::new(),
        })
    }

    /// Restores the id and login of an earlier registration, skipping the
    /// round trip of [`register_asset`](Self::register_asset).
    pub fn with_login(mut self, asset_id: &str, asset_login: &str) -> Result<Self, Error> {
        self.asset_id = String::try_from(asset_id).map_err(|_| Error::BufferOverflow)?;
        self.asset_login = String::try_from(asset_login).map_err(|_| Error::BufferOverflow)?;
        Ok(self)
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn sr_no(&self) -> &str {
        &self.config.sr_no
    }

    /// Platform-assigned id; empty until registered.
    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    /// Platform-assigned login; empty until registered.
    pub fn asset_login(&self) -> &str {
        &self.asset_login
    }

    pub fn is_registered(&self) -> bool {
        !self.asset_login.is_empty()
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// Registers the asset, or looks up its existing registration.
    ///
    /// The registration resource is probed with a GET first. When the
    /// platform answers with an error status the asset is assumed to be
    /// unknown and a POST creates it. Transport failures are returned as-is
    /// instead of being mistaken for "not registered".
    pub fn register_asset(&mut self) -> Result<(), Error> {
        let config = self.config.clone();
        let params = [
            ("apiKey", config.api_key.as_str()),
            ("srNo", config.sr_no.as_str()),
        ];

        let lookup: Result<ApiResponse<Registration>, Error> =
            self.do_api_get(REGISTRATION_API, &params, &[]);
        let response = match lookup {
            Ok(response) => response,
            Err(e) if e.is_api_status() => {
                info!(
                    "asset {} not registered yet (HTTP {}), registering",
                    config.sr_no.as_str(),
                    e.status().unwrap_or(0)
                );
                let request = RegistrationRequest {
                    api_key: &config.api_key,
                    sr_no: &config.sr_no,
                    asset_name: &config.asset_name,
                    asset_type_code: config.asset_type_code.as_deref(),
                };
                self.do_api_post(REGISTRATION_API, &request, &[])?
            }
            Err(e) => return Err(e),
        };

        self.asset_login = response.result.asset_login;
        self.asset_id = response.result.asset_id;
        info!(
            "asset {} registered as {}",
            config.sr_no.as_str(),
            self.asset_id.as_str()
        );
        Ok(())
    }

    /// GETs `path` with the query `params` and decodes the JSON response.
    ///
    /// `headers` are sent along with the defaults; once the asset is
    /// registered its Basic credentials replace any `Authorization` given here.
    pub fn do_api_get<T: DeserializeOwned>(
        &mut self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[Header],
    ) -> Result<T, Error> {
        let response = self.send(Method::Get, path, params, None, headers)?;
        decode(&response)
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON response.
    pub fn do_api_post<B: Serialize, T: DeserializeOwned>(
        &mut self,
        path: &str,
        body: &B,
        headers: &[Header],
    ) -> Result<T, Error> {
        let response = self.post_json(path, body, headers)?;
        decode(&response)
    }

    /// POSTs `body` as JSON; any 2xx counts as success, whatever the body.
    pub(crate) fn post_json<B: Serialize>(
        &mut self,
        path: &str,
        body: &B,
        headers: &[Header],
    ) -> Result<Response, Error> {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        let len = serde_json_core::to_slice(body, &mut payload).map_err(|e| match e {
            serde_json_core::ser::Error::BufferFull => Error::BufferOverflow,
            #[allow(unreachable_patterns)]
            _ => Error::Encode,
        })?;
        self.send(Method::Post, path, &[], Some(&payload[..len]), headers)
    }

    fn send(
        &mut self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&[u8]>,
        extra_headers: &[Header],
    ) -> Result<Response, Error> {
        let target: String<MAX_TARGET_LEN> = self.endpoint.target(path, params)?;
        let headers = self.request_headers(body.is_some(), extra_headers)?;
        let authority = self.endpoint.authority()?;

        let connection = self.network.connect(&authority).map_err(|e| {
            let e: NetworkError = e.into();
            warn!("cannot connect to {}: {}", authority.as_str(), e);
            Error::Network(e)
        })?;
        debug!("{} {}", method.as_str(), path);

        let mut client = Client::new(connection);
        let result = client.request(&Request {
            method,
            path: &target,
            headers,
            body,
        });
        if client.close().is_err() {
            debug!("closing connection to {} failed", authority.as_str());
        }
        let response = result?;

        debug!("{} {} -> {}", method.as_str(), path, response.status_code);
        if !response.is_success() {
            warn!(
                "{} {} failed with HTTP {}: {}",
                method.as_str(),
                path,
                response.status_code,
                response.body_str()
            );
            return Err(Error::from_status(response.status_code));
        }
        Ok(response)
    }

    /// Caller headers merged with the defaults and the asset credentials.
    fn request_headers(&self, has_body: bool, extra: &[Header]) -> Result<Headers, Error> {
        let mut headers = Headers::new();
        let mut push = |header: Header| headers.push(header).map_err(|_| Error::BufferOverflow);
        let given = |name: &str| extra.iter().any(|h| h.is(name));

        push(Header::new("Host", &self.endpoint.host_header()?)?)?;
        for header in extra {
            let managed = header.is("Host")
                || header.is("Content-Length")
                || header.is("Connection")
                || (self.is_registered() && header.is("Authorization"));
            if !managed {
                push(header.clone())?;
            }
        }
        if self.is_registered() {
            push(Header::new("Authorization", &basic_auth(&self.asset_login)?)?)?;
        }
        if !given("Accept") {
            push(Header::new("Accept", "application/json")?)?;
        }
        if has_body && !given("Content-Type") {
            push(Header::new("Content-Type", "application/json")?)?;
        }
        push(Header::new("Connection", "close")?)?;

        Ok(headers)
    }
}

/// `Basic base64(login + ":")`
pub fn basic_auth(login: &str) -> Result<String<MAX_HEADER_VALUE_LEN>, Error> {
    let mut credentials: String<{ MAX_ASSET_LOGIN_LEN + 1 }> = String::new();
    credentials
        .push_str(login)
        .map_err(|_| Error::BufferOverflow)?;
    credentials.push(':').map_err(|_| Error::BufferOverflow)?;

    let mut encoded = [0u8; MAX_BASIC_CREDENTIALS_LEN];
    let encoded = Base64::encode(credentials.as_bytes(), &mut encoded)
        .map_err(|_| Error::BufferOverflow)?;

    let mut value = String::new();
    value.push_str("Basic ").map_err(|_| Error::BufferOverflow)?;
    value.push_str(encoded).map_err(|_| Error::BufferOverflow)?;
    Ok(value)
}

fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, Error> {
    serde_json_core::from_slice::<T>(&response.body)
        .map(|(value, _)| value)
        .map_err(|_| {
            warn!("cannot decode response: {}", response.body_str());
            Error::Decode
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Close, Connection, Read, Write};

    struct NoNetwork;
    struct NoConnection;

    impl Read for NoConnection {
        type Error = ();
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Err(())
        }
    }

    impl Write for NoConnection {
        type Error = ();
        fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(())
        }
        fn flush(&mut self) -> Result<(), Self::Error> {
            Err(())
        }
    }

    impl Close for NoConnection {
        type Error = ();
        fn close(self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl Connection for NoConnection {}

    impl Connect for NoNetwork {
        type Connection = NoConnection;
        type Error = NetworkError;
        fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
            Err(NetworkError::ConnectionRefused)
        }
    }

    fn asset() -> Asset<NoNetwork> {
        let config = AssetConfig::new("https://sandbox.liveintersect.com/", "key", "SN1", "pump")
            .unwrap();
        Asset::new(NoNetwork, config).unwrap()
    }

    fn find<'a>(headers: &'a Headers, name: &str) -> Vec<&'a str> {
        headers
            .iter()
            .filter(|h| h.is(name))
            .map(|h| h.value.as_str())
            .collect()
    }

    #[test]
    fn test_basic_auth_value() {
        assert_eq!(basic_auth("li-42").unwrap().as_str(), "Basic bGktNDI6");
        assert_eq!(basic_auth("").unwrap().as_str(), "Basic Og==");
    }

    #[test]
    fn test_basic_auth_fits_longest_login() {
        let login = [b'a'; MAX_ASSET_LOGIN_LEN];
        let login = core::str::from_utf8(&login).unwrap();
        assert!(basic_auth(login).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = AssetConfig::new("sandbox.liveintersect.com", "key", "SN1", "pump").unwrap();
        assert_eq!(Asset::new(NoNetwork, config).unwrap_err(), Error::InvalidUrl);
    }

    #[test]
    fn test_headers_before_login() {
        let asset = asset();
        let headers = asset.request_headers(false, &[]).unwrap();
        assert_eq!(find(&headers, "Host"), ["sandbox.liveintersect.com"]);
        assert!(find(&headers, "Authorization").is_empty());
        assert!(find(&headers, "Content-Type").is_empty());
        assert_eq!(find(&headers, "Accept"), ["application/json"]);
        assert_eq!(find(&headers, "Connection"), ["close"]);
    }

    #[test]
    fn test_caller_headers_are_merged() {
        let asset = asset().with_login("42", "li-42").unwrap();
        let extra = [
            Header::new("X-Trace", "abc").unwrap(),
            Header::new("authorization", "Bearer nope").unwrap(),
            Header::new("Content-Type", "application/json; charset=utf-8").unwrap(),
        ];
        let headers = asset.request_headers(true, &extra).unwrap();
        assert_eq!(find(&headers, "X-Trace"), ["abc"]);
        assert_eq!(find(&headers, "Authorization"), ["Basic bGktNDI6"]);
        assert_eq!(
            find(&headers, "Content-Type"),
            ["application/json; charset=utf-8"]
        );
    }

    #[test]
    fn test_caller_authorization_kept_before_login() {
        let asset = asset();
        let extra = [Header::new("Authorization", "Bearer token").unwrap()];
        let headers = asset.request_headers(false, &extra).unwrap();
        assert_eq!(find(&headers, "Authorization"), ["Bearer token"]);
    }

    #[test]
    fn test_connect_failure_is_network_error() {
        let mut asset = asset();
        let result: Result<ApiResponse<Registration>, Error> =
            asset.do_api_get(REGISTRATION_API, &[], &[]);
        assert_eq!(
            result.unwrap_err(),
            Error::Network(NetworkError::ConnectionRefused)
        );
        assert_eq!(asset.register_asset(), Err(Error::Network(NetworkError::ConnectionRefused)));
        assert!(!asset.is_registered());
    }
}
