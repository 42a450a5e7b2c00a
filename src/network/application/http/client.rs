use crate::network::error::Error;
use crate::network::{Close, Connection};
use core::fmt::Write as _;
use heapless::{String, Vec};

/// Maximum number of headers in a request or response.
pub const MAX_HEADERS: usize = 16;
/// Maximum length of a header name.
pub const MAX_HEADER_NAME_LEN: usize = 64;
/// Maximum length of a header value.
pub const MAX_HEADER_VALUE_LEN: usize = 256;
/// Capacity of the buffer a request (head and body) is framed into.
pub const MAX_REQUEST_LEN: usize = 2048;
/// Capacity of the status line and header block of a response.
pub const MAX_RESPONSE_HEAD_LEN: usize = 2048;
/// Capacity of a response body.
pub const MAX_RESPONSE_BODY_LEN: usize = 4096;

const DEFAULT_USER_AGENT: &str = "liveintersect-rs/0.1";

/// A list of request or response headers.
pub type Headers = Vec<Header, MAX_HEADERS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String<MAX_HEADER_NAME_LEN>,
    pub value: String<MAX_HEADER_VALUE_LEN>,
}

impl Header {
    /// Builds a header, failing when either part exceeds its capacity.
    pub fn new(name: &str, value: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::try_from(name).map_err(|_| Error::BufferFull)?,
            value: String::try_from(value).map_err(|_| Error::BufferFull)?,
        })
    }

    /// Case-insensitive name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub method: Method,
    /// Origin-form target, including any query string.
    pub path: &'a str,
    pub headers: Headers,
    pub body: Option<&'a [u8]>,
}

#[derive(Debug)]
pub struct Response {
    pub status_code: u16,
    pub headers: Headers,
    pub body: Vec<u8, MAX_RESPONSE_BODY_LEN>,
}

impl Response {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// First header value named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.is(name))
            .map(|h| h.value.as_str())
    }

    /// The body as UTF-8, or `""` when it is not valid UTF-8.
    pub fn body_str(&self) -> &str {
        core::str::from_utf8(&self.body).unwrap_or("")
    }
}

pub struct Client<C: Connection> {
    connection: C,
}

impl<C: Connection> Client<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    /// Closes the underlying connection.
    pub fn close(self) -> Result<(), Error> {
        Close::close(self.connection).map_err(|_| Error::ConnectionClosed)
    }

    /// Gives back the underlying connection.
    pub fn into_inner(self) -> C {
        self.connection
    }

    pub fn request(&mut self, request: &Request) -> Result<Response, Error> {
        let request_buf = encode_request(request)?;

        self.connection
            .write_all(&request_buf)
            .map_err(|_| Error::WriteError)?;
        self.connection.flush().map_err(|_| Error::WriteError)?;

        self.read_response()
    }

    fn read_response(&mut self) -> Result<Response, Error> {
        // --- Status line and headers ---
        let mut head_buf = [0u8; MAX_RESPONSE_HEAD_LEN];
        let mut total_read = 0;
        let header_end_pos = loop {
            if let Some(pos) = find_slice(&head_buf[..total_read], b"\r\n\r\n") {
                break pos;
            }
            if total_read == head_buf.len() {
                return Err(Error::BufferFull);
            }
            match self.connection.read(&mut head_buf[total_read..]) {
                Ok(0) => return Err(Error::ConnectionClosed),
                Ok(n) => total_read += n,
                Err(_) => return Err(Error::ReadError),
            }
        };

        let header_str =
            core::str::from_utf8(&head_buf[..header_end_pos]).map_err(|_| Error::ProtocolError)?;
        let mut lines = header_str.lines();

        let status_line = lines.next().ok_or(Error::ProtocolError)?;
        let mut status_parts = status_line.splitn(3, ' ');
        let version = status_parts.next().ok_or(Error::ProtocolError)?;
        if !version.starts_with("HTTP/") {
            return Err(Error::ProtocolError);
        }
        let status_code = status_parts
            .next()
            .ok_or(Error::ProtocolError)?
            .parse::<u16>()
            .map_err(|_| Error::ProtocolError)?;

        let mut headers = Headers::new();
        let mut content_length: Option<usize> = None;
        let mut chunked = false;

        for line in lines {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line.split_once(':').ok_or(Error::ProtocolError)?;
            let (name, value) = (name.trim(), value.trim());

            if name.eq_ignore_ascii_case("Content-Length") {
                content_length = Some(value.parse::<usize>().map_err(|_| Error::ProtocolError)?);
            } else if name.eq_ignore_ascii_case("Transfer-Encoding") {
                chunked = value.eq_ignore_ascii_case("chunked");
            }

            // Headers beyond capacity are dropped; only the framing ones matter here.
            if let Ok(header) = Header::new(name, value) {
                let _ = headers.push(header);
            }
        }

        // --- Body ---
        let mut body: Vec<u8, MAX_RESPONSE_BODY_LEN> =
            Vec::from_slice(&head_buf[header_end_pos + 4..total_read])
                .map_err(|_| Error::BufferFull)?;

        let no_body = status_code == 204 || status_code == 304 || (100..200).contains(&status_code);
        if no_body {
            body.clear();
        } else if chunked {
            self.read_chunked(&mut body)?;
            decode_chunked(&mut body)?;
        } else if let Some(len) = content_length {
            if len > body.capacity() {
                return Err(Error::BufferFull);
            }
            while body.len() < len {
                let mut temp_buf = [0u8; 256];
                let read_len = core::cmp::min(len - body.len(), temp_buf.len());
                match self.connection.read(&mut temp_buf[..read_len]) {
                    Ok(0) => return Err(Error::ConnectionClosed),
                    Ok(n) => body
                        .extend_from_slice(&temp_buf[..n])
                        .map_err(|_| Error::BufferFull)?,
                    Err(_) => return Err(Error::ReadError),
                }
            }
            body.truncate(len);
        } else {
            self.read_until_close(&mut body)?;
        }

        Ok(Response {
            status_code,
            headers,
            body,
        })
    }

    /// Reads into `body` until the peer closes the connection.
    fn read_until_close(&mut self, body: &mut Vec<u8, MAX_RESPONSE_BODY_LEN>) -> Result<(), Error> {
        while self.read_more(body)? > 0 {}
        Ok(())
    }

    /// Reads into `body` until it holds the terminating zero-size chunk.
    fn read_chunked(&mut self, body: &mut Vec<u8, MAX_RESPONSE_BODY_LEN>) -> Result<(), Error> {
        while !chunked_complete(&body[..])? {
            if self.read_more(body)? == 0 {
                return Err(Error::ConnectionClosed);
            }
        }
        Ok(())
    }

    fn read_more(&mut self, body: &mut Vec<u8, MAX_RESPONSE_BODY_LEN>) -> Result<usize, Error> {
        let mut temp_buf = [0u8; 256];
        let n = self
            .connection
            .read(&mut temp_buf)
            .map_err(|_| Error::ReadError)?;
        body.extend_from_slice(&temp_buf[..n])
            .map_err(|_| Error::BufferFull)?;
        Ok(n)
    }
}

/// Frames `request` into a single buffer ready to be written.
pub fn encode_request(request: &Request) -> Result<Vec<u8, MAX_REQUEST_LEN>, Error> {
    let mut request_buf: Vec<u8, MAX_REQUEST_LEN> = Vec::new();
    let mut push = |bytes: &[u8]| {
        request_buf
            .extend_from_slice(bytes)
            .map_err(|_| Error::BufferFull)
    };

    // Request line
    push(request.method.as_str().as_bytes())?;
    push(b" ")?;
    push(request.path.as_bytes())?;
    push(b" HTTP/1.1\r\n")?;

    // Headers
    let mut has_user_agent = false;
    for header in &request.headers {
        if header.is("User-Agent") {
            has_user_agent = true;
        }
        if header.is("Content-Length") {
            continue;
        }
        push(header.name.as_bytes())?;
        push(b": ")?;
        push(header.value.as_bytes())?;
        push(b"\r\n")?;
    }

    if !has_user_agent {
        push(b"User-Agent: ")?;
        push(DEFAULT_USER_AGENT.as_bytes())?;
        push(b"\r\n")?;
    }

    // Body
    if let Some(body) = request.body {
        let mut len_str: String<10> = String::new();
        write!(len_str, "{}", body.len()).map_err(|_| Error::BufferFull)?;

        push(b"Content-Length: ")?;
        push(len_str.as_bytes())?;
        push(b"\r\n\r\n")?;
        push(body)?;
    } else {
        push(b"\r\n")?;
    }

    Ok(request_buf)
}

/// Parses a chunk-size line, ignoring chunk extensions after `;`.
fn parse_chunk_size(line: &[u8]) -> Result<usize, Error> {
    let line = core::str::from_utf8(line).map_err(|_| Error::ProtocolError)?;
    let size_hex = line.split(';').next().unwrap_or("").trim();
    usize::from_str_radix(size_hex, 16).map_err(|_| Error::ProtocolError)
}

/// Offset just past a chunk of `size` bytes starting at `start`, CRLF included.
fn chunk_end(start: usize, size: usize) -> Result<usize, Error> {
    start
        .checked_add(size)
        .and_then(|n| n.checked_add(2))
        .ok_or(Error::ProtocolError)
}

/// Whether `raw` holds a chunked body up to its zero-size chunk.
fn chunked_complete(raw: &[u8]) -> Result<bool, Error> {
    let mut read = 0;
    loop {
        let Some(line_len) = find_slice(&raw[read..], b"\r\n") else {
            return Ok(false);
        };
        let size = parse_chunk_size(&raw[read..read + line_len])?;
        read += line_len + 2;
        if size == 0 {
            return Ok(true);
        }
        read = chunk_end(read, size)?;
        if read > raw.len() {
            return Ok(false);
        }
    }
}

/// Decodes a chunked transfer-encoded body in place.
fn decode_chunked(body: &mut Vec<u8, MAX_RESPONSE_BODY_LEN>) -> Result<(), Error> {
    let mut read = 0;
    let mut written = 0;
    loop {
        let line_len = find_slice(&body[read..], b"\r\n").ok_or(Error::ProtocolError)?;
        let size = parse_chunk_size(&body[read..read + line_len])?;
        read += line_len + 2;

        if size == 0 {
            break;
        }
        let end = chunk_end(read, size)?;
        if end > body.len() {
            return Err(Error::ConnectionClosed);
        }
        body.copy_within(read..read + size, written);
        written += size;
        read = end;
    }
    body.truncate(written);
    Ok(())
}

/// Finds the first occurrence of a slice in another slice and returns its starting position.
fn find_slice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
