//! HTTP/1.1 framing for h1serve
//!
//! This module reads a single request head off a blocking socket, parses it,
//! and sends a response back, optionally streaming a file body. It covers one
//! request/response exchange per connection; listener setup and request
//! handling belong to the caller.
//!
//! # Architecture
//!
//! All socket I/O goes through a small operations abstraction so the framing
//! code never touches a file descriptor directly:
//!
//! - `SocketOps` trait defines operations (recv_chunk, send_all, read_timeout)
//! - `Received` is the tagged outcome of a receive: data, timeout, or EOF
//! - `TcpSocket` implements the trait over a `TcpStream` with poll-based
//!   timeouts; tests substitute scripted implementations
//!
//! # Examples
//!
//! ```no_run
//! use h1serve::http::{HttpServer, Response, TcpSocket};
//! use std::net::TcpListener;
//!
//! let listener = TcpListener::bind("127.0.0.1:8080").unwrap();
//! let (stream, _) = listener.accept().unwrap();
//! let mut server = HttpServer::new(TcpSocket::new(stream));
//!
//! // Receive request
//! let request = server.receive_request().unwrap();
//!
//! // Send response
//! let response = Response::builder()
//!     .status("200 OK")
//!     .header("Content-Type", "text/plain")
//!     .body(format!("you asked for {}", request.path()).into_bytes())
//!     .build();
//! server.send_response(response).unwrap();
//! ```

pub mod encoding;
pub mod headers;
pub mod message;
pub mod parser;
pub mod reader;
pub mod server;
pub mod session;

pub use encoding::Encoding;
pub use headers::HeaderView;
pub use message::{stream_len, Payload, Request, Response, ResponseBuilder};
pub use parser::parse_request;
pub use reader::read_data;
pub use server::HttpServer;
pub use session::{Received, SocketOps, TcpSocket};

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP operation errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("Decode error: invalid {encoding} at byte {offset}")]
    Decode { encoding: Encoding, offset: usize },

    #[error("Encode error: {ch:?} is not representable in {encoding}")]
    Encode { encoding: Encoding, ch: char },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Timeout")]
    Timeout,

    #[error("Connection closed")]
    ConnectionClosed,
}

/// End of a header block on the wire
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// CRLF line ending
pub const CRLF: &str = "\r\n";

/// Value of the mandatory `Server` response header
pub const SERVER_IDENT: &str = concat!("h1serve/", env!("CARGO_PKG_VERSION"));

/// Default bytes requested per receive
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default cap on the accumulated request head
pub const DEFAULT_MAX_HEAD: usize = 8192;
