//! Scripted transport for driving the asset client without a network.
//!
//! Every `connect` pops the next queued reply. Whatever the client writes is
//! recorded so tests can inspect the requests afterwards.
#![allow(dead_code)]

use liveintersect::network::error::Error;
use liveintersect::network::{Close, Connect, Connection, Read, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Bytes handed out per `read`, small enough to split status line and headers.
const READ_CHUNK: usize = 7;

#[derive(Debug)]
enum Reply {
    Raw(Vec<u8>),
    ConnectFailure(Error),
    ReadFailure,
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    remotes: Vec<String>,
    requests: Vec<Vec<u8>>,
    closed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    state: Rc<RefCell<State>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response with a `Content-Length`.
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        let raw = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        );
        self.respond_raw(raw.as_bytes())
    }

    /// Queues a response exactly as given.
    pub fn respond_raw(&self, raw: &[u8]) -> &Self {
        self.state
            .borrow_mut()
            .replies
            .push_back(Reply::Raw(raw.to_vec()));
        self
    }

    /// The next connection attempt is refused.
    pub fn refuse(&self) -> &Self {
        self.fail_connect(Error::ConnectionRefused)
    }

    /// The next connection attempt fails with `error`.
    pub fn fail_connect(&self, error: Error) -> &Self {
        self.state
            .borrow_mut()
            .replies
            .push_back(Reply::ConnectFailure(error));
        self
    }

    /// The next connection accepts the request, then fails on read.
    pub fn fail_read(&self) -> &Self {
        self.state.borrow_mut().replies.push_back(Reply::ReadFailure);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        let state = self.state.borrow();
        state
            .requests
            .iter()
            .zip(&state.remotes)
            .map(|(raw, remote)| RecordedRequest::parse(remote, raw))
            .collect()
    }

    pub fn pending_replies(&self) -> usize {
        self.state.borrow().replies.len()
    }

    pub fn closed_connections(&self) -> usize {
        self.state.borrow().closed
    }
}

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let mut state = self.state.borrow_mut();
        let reply = match state.replies.pop_front() {
            Some(Reply::ConnectFailure(error)) => return Err(error),
            None => return Err(Error::ConnectionRefused),
            Some(reply) => reply,
        };
        state.remotes.push(remote.to_string());
        state.requests.push(Vec::new());
        let (data, fail_read) = match reply {
            Reply::Raw(data) => (data, false),
            _ => (Vec::new(), true),
        };
        Ok(MockConnection {
            state: Rc::clone(&self.state),
            index: state.requests.len() - 1,
            data,
            read_pos: 0,
            fail_read,
        })
    }
}

#[derive(Debug)]
pub struct MockConnection {
    state: Rc<RefCell<State>>,
    index: usize,
    data: Vec<u8>,
    read_pos: usize,
    fail_read: bool,
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_read {
            return Err(Error::ReadError);
        }
        let remaining = &self.data[self.read_pos..];
        let len = buf.len().min(remaining.len()).min(READ_CHUNK);
        buf[..len].copy_from_slice(&remaining[..len]);
        self.read_pos += len;
        Ok(len)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.state.borrow_mut().requests[self.index].extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.state.borrow_mut().closed += 1;
        Ok(())
    }
}

impl Connection for MockConnection {}

/// A request as the server would have seen it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub remote: String,
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    fn parse(remote: &str, raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let (head, body) = text.split_once("\r\n\r\n").expect("request has no header block");
        let mut lines = head.lines();
        let mut request_line = lines.next().expect("empty request").split(' ');
        let method = request_line.next().unwrap_or_default().to_string();
        let target = request_line.next().unwrap_or_default().to_string();
        assert_eq!(request_line.next(), Some("HTTP/1.1"));

        let headers = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();

        Self {
            remote: remote.to_string(),
            method,
            target,
            headers,
            body: body.to_string(),
        }
    }

    /// All values of header `name`, compared case-insensitively.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).first().copied()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
