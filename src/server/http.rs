//! Just enough HTTP/1.1 for a read-only JSON API: one request per
//! connection, request head only, responses always close the connection.

use serde::Serialize;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

pub const MAX_HEAD_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    RequestTimeout,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::RequestTimeout => 408,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::RequestTimeout => "Request Timeout",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    query: Vec<(String, String)>,
}

impl Request {
    /// Parses the request line of a head; header lines are ignored.
    pub fn parse(head: &str) -> Option<Self> {
        let request_line = head.lines().next()?;
        let mut parts = request_line.split_whitespace();
        let method = parts.next()?;
        let target = parts.next()?;
        let version = parts.next()?;

        if parts.next().is_some() || !version.starts_with("HTTP/1.") || !target.starts_with('/') {
            return None;
        }

        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };

        let query = url::form_urlencoded::parse(raw_query.as_bytes())
            .into_owned()
            .collect();

        Some(Self {
            method: method.to_string(),
            path: path.to_string(),
            query,
        })
    }

    /// First value of a query parameter. `?query=` yields `Some("")`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug)]
pub enum ReadOutcome {
    Head(String),
    TooLarge,
    Malformed,
    Closed,
}

/// Reads until the blank line that ends the request head (CRLF or bare LF).
pub async fn read_head<R: AsyncRead + Unpin>(stream: &mut R) -> io::Result<ReadOutcome> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(ReadOutcome::Closed);
            }
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = find_head_end(&buf) {
            buf.truncate(end);
            break;
        }
        if buf.len() > MAX_HEAD_BYTES {
            return Ok(ReadOutcome::TooLarge);
        }
    }

    match String::from_utf8(buf) {
        Ok(head) => Ok(ReadOutcome::Head(head)),
        Err(_) => Ok(ReadOutcome::Malformed),
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    // 容許只用 \n 換行的客戶端
    (0..buf.len()).find(|&i| {
        let rest = &buf[i..];
        rest.starts_with(b"\r\n\r\n") || rest.starts_with(b"\n\n")
    })
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: Vec::new(),
                body,
            },
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                Self::error(
                    Status::InternalServerError,
                    "internal",
                    "failed to serialize response",
                )
            }
        }
    }

    pub fn error(status: Status, kind: &str, message: &str) -> Self {
        let body = serde_json::json!({ "error": message, "kind": kind });
        Self {
            status,
            headers: Vec::new(),
            body: body.to_string().into_bytes(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n",
            self.status.code(),
            self.status.reason(),
            self.body.len()
        );
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
