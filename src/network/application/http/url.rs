//! Base URL parsing and query-string encoding.

use crate::network::error::Error;
use core::fmt::Write as _;
use heapless::String;

/// Maximum length of a host name.
pub const MAX_HOST_LEN: usize = 128;
/// Maximum length of the base path a tenant is mounted under.
pub const MAX_BASE_PATH_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// A parsed `http(s)://host[:port][/base]` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String<MAX_HOST_LEN>,
    port: u16,
    base_path: String<MAX_BASE_PATH_LEN>,
}

impl Endpoint {
    pub fn parse(url: &str) -> Result<Self, Error> {
        let url = url.trim();
        let (scheme, rest) = if let Some(rest) = strip_prefix_ignore_case(url, "https://") {
            (Scheme::Https, rest)
        } else if let Some(rest) = strip_prefix_ignore_case(url, "http://") {
            (Scheme::Http, rest)
        } else {
            return Err(Error::InvalidAddress);
        };

        let (authority, path) = match rest.find('/') {
            Some(pos) => rest.split_at(pos),
            None => (rest, ""),
        };
        if path.contains(['?', '#']) {
            return Err(Error::InvalidAddress);
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (
                host,
                port.parse::<u16>().map_err(|_| Error::InvalidAddress)?,
            ),
            None => (authority, scheme.default_port()),
        };
        if host.is_empty() || host.contains(['@', ' ']) || port == 0 {
            return Err(Error::InvalidAddress);
        }

        Ok(Self {
            scheme,
            host: String::try_from(host).map_err(|_| Error::InvalidAddress)?,
            port,
            base_path: String::try_from(path.trim_end_matches('/'))
                .map_err(|_| Error::InvalidAddress)?,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// `true` when the transport must wrap the connection in TLS.
    pub fn is_secure(&self) -> bool {
        self.scheme == Scheme::Https
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path prefix without a trailing slash; empty for a bare host.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `host:port`, as handed to [`Connect::connect`](crate::network::Connect::connect).
    pub fn authority(&self) -> Result<String<{ MAX_HOST_LEN + 6 }>, Error> {
        let mut out = String::new();
        write!(out, "{}:{}", self.host, self.port).map_err(|_| Error::BufferFull)?;
        Ok(out)
    }

    /// Value of the `Host` header; the port is omitted when it is the scheme default.
    pub fn host_header(&self) -> Result<String<{ MAX_HOST_LEN + 6 }>, Error> {
        if self.port == self.scheme.default_port() {
            String::try_from(self.host.as_str()).map_err(|_| Error::BufferFull)
        } else {
            self.authority()
        }
    }

    /// Builds the request target `base_path + path [+ ?query]`.
    pub fn target<const N: usize>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<String<N>, Error> {
        let mut out: String<N> = String::new();
        out.push_str(&self.base_path).map_err(|_| Error::BufferFull)?;
        if !path.starts_with('/') {
            out.push('/').map_err(|_| Error::BufferFull)?;
        }
        out.push_str(path).map_err(|_| Error::BufferFull)?;
        for (i, (name, value)) in params.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' })
                .map_err(|_| Error::BufferFull)?;
            percent_encode(name, &mut out)?;
            out.push('=').map_err(|_| Error::BufferFull)?;
            percent_encode(value, &mut out)?;
        }
        Ok(out)
    }
}

/// Appends `input` to `out`, escaping everything outside the RFC 3986 unreserved set.
pub fn percent_encode<const N: usize>(input: &str, out: &mut String<N>) -> Result<(), Error> {
    for byte in input.bytes() {
        let unreserved = byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~');
        if unreserved {
            out.push(byte as char).map_err(|_| Error::BufferFull)?;
        } else {
            write!(out, "%{:02X}", byte).map_err(|_| Error::BufferFull)?;
        }
    }
    Ok(())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_with_trailing_slash() {
        let endpoint = Endpoint::parse("https://sandbox.liveintersect.com/").unwrap();
        assert_eq!(endpoint.scheme(), Scheme::Https);
        assert!(endpoint.is_secure());
        assert_eq!(endpoint.host(), "sandbox.liveintersect.com");
        assert_eq!(endpoint.port(), 443);
        assert_eq!(endpoint.base_path(), "");
        assert_eq!(endpoint.authority().unwrap().as_str(), "sandbox.liveintersect.com:443");
        assert_eq!(endpoint.host_header().unwrap().as_str(), "sandbox.liveintersect.com");
    }

    #[test]
    fn test_parse_http_with_port_and_base_path() {
        let endpoint = Endpoint::parse("HTTP://10.0.0.5:8080/li/").unwrap();
        assert_eq!(endpoint.scheme(), Scheme::Http);
        assert_eq!(endpoint.port(), 8080);
        assert_eq!(endpoint.base_path(), "/li");
        assert_eq!(endpoint.host_header().unwrap().as_str(), "10.0.0.5:8080");

        let target: String<64> = endpoint.target("/agentapi/assets/42", &[]).unwrap();
        assert_eq!(target.as_str(), "/li/agentapi/assets/42");
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        assert_eq!(Endpoint::parse("ftp://host"), Err(Error::InvalidAddress));
        assert_eq!(Endpoint::parse("https://"), Err(Error::InvalidAddress));
        assert_eq!(Endpoint::parse("http://host:port"), Err(Error::InvalidAddress));
        assert_eq!(Endpoint::parse("http://host/a?b=c"), Err(Error::InvalidAddress));
        assert_eq!(Endpoint::parse("sandbox.liveintersect.com"), Err(Error::InvalidAddress));
    }

    #[test]
    fn test_target_encodes_query() {
        let endpoint = Endpoint::parse("http://h").unwrap();
        let target: String<128> = endpoint
            .target(
                "/agentapi/registration",
                &[("apiKey", "k+y/=="), ("srNo", "SN 001")],
            )
            .unwrap();
        assert_eq!(
            target.as_str(),
            "/agentapi/registration?apiKey=k%2By%2F%3D%3D&srNo=SN%20001"
        );
    }

    #[test]
    fn test_target_overflow() {
        let endpoint = Endpoint::parse("http://h").unwrap();
        let target: Result<String<8>, _> = endpoint.target("/agentapi/assets", &[]);
        assert_eq!(target, Err(Error::BufferFull));
    }
}
