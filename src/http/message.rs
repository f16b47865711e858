//! HTTP message types
//!
//! Defines the parsed request, the response with its two payload shapes, and
//! the send path that puts a response on the wire: one write for the header
//! block, then the payload.

use super::encoding::Encoding;
use super::headers::HeaderView;
use super::session::SocketOps;
use super::{Result, CRLF, SERVER_IDENT};
use chrono::{DateTime, Utc};
use std::io::{self, Read, Seek, SeekFrom};

/// Bytes read per iteration when streaming a file payload
const FILE_CHUNK: usize = 8192;

/// Total length of a seekable byte source
///
/// Seeks to the end to learn the length, then restores the position it found
/// the stream at, so a later read from the caller picks up where it left off.
pub fn stream_len<T: Seek + ?Sized>(stream: &mut T) -> io::Result<u64> {
    let pos = stream.stream_position()?;
    let len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(pos))?;
    Ok(len)
}

/// Format a timestamp as an RFC 7231 IMF-fixdate
///
/// Example: `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn imf_fixdate(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parsed HTTP request
///
/// Headers are the raw wire lines in arrival order, duplicates included. The
/// body is not read off the socket with the head; it stays `None` until a
/// caller fetches and attaches it.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    version: String,
    headers: Vec<String>,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request from its parsed parts
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        version: impl Into<String>,
        headers: Vec<String>,
    ) -> Self {
        Request {
            method: method.into(),
            path: path.into(),
            version: version.into(),
            headers,
            body: None,
        }
    }

    /// Get the request method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path, exactly as it appeared on the wire
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the HTTP version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the raw header lines
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the body, if one has been attached
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Attach a body
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = Some(body);
    }

    /// Build a lookup view over the header lines
    pub fn header_view(&self) -> HeaderView<'_> {
        HeaderView::parse(&self.headers)
    }
}

/// Response payload
///
/// Exactly one of an in-memory body or a streamable file; a response with
/// neither carries an empty `Body`.
#[derive(Debug)]
pub enum Payload<F> {
    /// Bytes held in memory, written after the header block in one piece
    Body(Vec<u8>),
    /// Open file handle, streamed in chunks from its current position
    File(F),
}

impl<F: Seek> Payload<F> {
    /// Byte count for the `Content-Length` header
    ///
    /// Probing a file does not disturb its read position.
    pub fn content_length(&mut self) -> io::Result<u64> {
        match self {
            Payload::Body(body) => Ok(body.len() as u64),
            Payload::File(file) => stream_len(file),
        }
    }
}

/// HTTP response
///
/// Built once, consumed by `send`. The status string goes onto the status
/// line verbatim; mandatory `Server`, `Date`, `Connection`, and
/// `Content-Length` headers are appended after the caller's at send time,
/// with no duplicate suppression.
#[derive(Debug)]
pub struct Response<F = std::fs::File> {
    version: String,
    status: String,
    headers: Vec<String>,
    payload: Payload<F>,
    encoding: Encoding,
}

impl Response {
    /// Create an empty-bodied response with the given status
    pub fn new(status: impl Into<String>) -> Self {
        Response {
            version: "HTTP/1.1".to_string(),
            status: status.into(),
            headers: Vec::new(),
            payload: Payload::Body(Vec::new()),
            encoding: Encoding::default(),
        }
    }

    /// Create a builder for constructing responses
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }
}

impl<F> Response<F> {
    /// Get the HTTP version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the status string
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Get the caller-supplied header lines
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the header-block encoding
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl<F: Read + Seek> Response<F> {
    /// Send the response
    ///
    /// The header block goes out as a single write. An in-memory body
    /// follows in one more write; a file payload is streamed in chunks and
    /// never pulled into the header buffer. The content length is measured
    /// before anything is written, so a failed measurement sends nothing.
    pub fn send<S: SocketOps>(mut self, sock: &mut S) -> Result<()> {
        let content_length = self.payload.content_length()?;

        let mut head = String::new();
        head.push_str(&self.version);
        head.push(' ');
        head.push_str(&self.status);
        head.push_str(CRLF);

        for line in &self.headers {
            head.push_str(line);
            head.push_str(CRLF);
        }

        head.push_str("Server: ");
        head.push_str(SERVER_IDENT);
        head.push_str(CRLF);
        head.push_str("Date: ");
        head.push_str(&imf_fixdate(Utc::now()));
        head.push_str(CRLF);
        head.push_str("Connection: close");
        head.push_str(CRLF);
        head.push_str("Content-Length: ");
        head.push_str(&content_length.to_string());
        head.push_str(CRLF);
        head.push_str(CRLF);

        let block = self.encoding.encode(&head)?;
        sock.send_all(&block)?;
        tracing::debug!(status = %self.status, content_length, "response head sent");

        match self.payload {
            Payload::Body(body) => {
                if !body.is_empty() {
                    sock.send_all(&body)?;
                }
            }
            Payload::File(mut file) => {
                let mut buf = [0u8; FILE_CHUNK];
                loop {
                    let n = file.read(&mut buf)?;
                    if n == 0 {
                        break;
                    }
                    sock.send_all(&buf[..n])?;
                }
            }
        }

        Ok(())
    }
}

/// Builder for HTTP responses
#[derive(Debug)]
pub struct ResponseBuilder<F = std::fs::File> {
    version: Option<String>,
    status: Option<String>,
    headers: Vec<String>,
    payload: Payload<F>,
    encoding: Encoding,
}

impl<F> Default for ResponseBuilder<F> {
    fn default() -> Self {
        ResponseBuilder {
            version: None,
            status: None,
            headers: Vec::new(),
            payload: Payload::Body(Vec::new()),
            encoding: Encoding::default(),
        }
    }
}

impl<F> ResponseBuilder<F> {
    /// Set the HTTP version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the status string, echoed verbatim into the status line
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push(format!("{}: {}", name.into(), value.into()));
        self
    }

    /// Add a header as a raw wire line
    pub fn raw_header(mut self, line: impl Into<String>) -> Self {
        self.headers.push(line.into());
        self
    }

    /// Set the header-block encoding
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Use an in-memory body as the payload
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.payload = Payload::Body(body);
        self
    }

    /// Use an open file as the payload, streamed at send time
    pub fn file<G>(self, file: G) -> ResponseBuilder<G> {
        ResponseBuilder {
            version: self.version,
            status: self.status,
            headers: self.headers,
            payload: Payload::File(file),
            encoding: self.encoding,
        }
    }

    /// Build the response
    pub fn build(self) -> Response<F> {
        Response {
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            status: self.status.unwrap_or_else(|| "200 OK".to_string()),
            headers: self.headers,
            payload: self.payload,
            encoding: self.encoding,
        }
    }
}
