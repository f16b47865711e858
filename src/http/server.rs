//! Per-connection server half
//!
//! Ties the socket reader and the request parser together over one socket
//! and forwards responses. One instance covers one request/response
//! exchange; the connection closes afterwards.

use super::encoding::Encoding;
use super::message::{Request, Response};
use super::session::{SocketOps, TcpSocket};
use super::{parser, reader, Result, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_HEAD};
use std::io::{Read, Seek};
use std::net::TcpStream;

/// HTTP server
///
/// Provides methods for receiving a request and sending a response over a
/// single connection.
pub struct HttpServer<S: SocketOps> {
    sock: S,
    chunk_size: usize,
    max_size: usize,
    encoding: Encoding,
}

impl HttpServer<TcpSocket> {
    /// Wrap an accepted TCP stream with default settings
    pub fn from_stream(stream: TcpStream) -> Self {
        HttpServer::new(TcpSocket::new(stream))
    }
}

impl<S: SocketOps> HttpServer<S> {
    /// Create a new HTTP server over a socket
    pub fn new(sock: S) -> Self {
        HttpServer {
            sock,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_size: DEFAULT_MAX_HEAD,
            encoding: Encoding::default(),
        }
    }

    /// Set the bytes requested per receive
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = chunk_size;
    }

    /// Set the cap on the accumulated request head
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    /// Set the encoding used to decode request heads
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// Receive one request head
    ///
    /// Reads until the header terminator, the head cap, end of stream, or a
    /// receive timeout, then parses whatever arrived. A timed-out or
    /// truncated head surfaces as a parse error, not an I/O error.
    pub fn receive_request(&mut self) -> Result<Request> {
        let data = reader::read_data(&mut self.sock, self.chunk_size, self.max_size)?;
        parser::parse_request(&data, self.encoding)
    }

    /// Send a response
    ///
    /// The response carries its own header-block encoding.
    pub fn send_response<F: Read + Seek>(&mut self, response: Response<F>) -> Result<()> {
        response.send(&mut self.sock)
    }

    /// Get a reference to the underlying socket
    pub fn socket(&self) -> &S {
        &self.sock
    }

    /// Get a mutable reference to the underlying socket
    pub fn socket_mut(&mut self) -> &mut S {
        &mut self.sock
    }
}

#[cfg(test)]
mod tests {
    use super::super::Error;
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_receive_request() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"GET /test HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .unwrap();
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::from_stream(stream);

        let request = server.receive_request().unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/test");
        assert_eq!(request.header_view().get("Host"), Some("localhost"));

        handle.join().unwrap();
    }

    #[test]
    fn test_send_response() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .unwrap();

            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).unwrap();
            let response = String::from_utf8_lossy(&buf);

            assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
            assert!(response.contains("Server: "));
            assert!(response.contains("Date: "));
            assert!(response.contains("Connection: close\r\n"));
            assert!(response.contains("Content-Length: 5\r\n"));
            assert!(response.ends_with("Hello"));
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::from_stream(stream);

        let _request = server.receive_request().unwrap();

        let response = Response::builder()
            .status("200 OK")
            .body(b"Hello".to_vec())
            .build();
        server.send_response(response).unwrap();
        drop(server);

        handle.join().unwrap();
    }

    #[test]
    fn test_request_written_in_pieces() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            for piece in [&b"GET /split"[..], b" HTTP/1.1\r\nfoo", b": bar\r\n\r\n"] {
                stream.write_all(piece).unwrap();
                stream.flush().unwrap();
                thread::sleep(Duration::from_millis(10));
            }
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::from_stream(stream);
        server.set_chunk_size(8);

        let request = server.receive_request().unwrap();
        assert_eq!(request.path(), "/split");
        assert_eq!(request.headers(), &["foo: bar"]);

        handle.join().unwrap();
    }

    #[test]
    fn test_timed_out_head_is_a_parse_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            // No terminator, then silence.
            stream.write_all(b"GET /incomplete").unwrap();
            thread::sleep(Duration::from_millis(300));
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::from_stream(stream);
        server.socket_mut().set_timeout(Some(Duration::from_millis(100)));

        assert!(matches!(
            server.receive_request(),
            Err(Error::MalformedRequestLine(_))
        ));

        handle.join().unwrap();
    }

    #[test]
    fn test_head_over_max_size_is_a_parse_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream
                .write_all(b"GET /a/rather/long/path HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .unwrap();
        });

        let (stream, _) = listener.accept().unwrap();
        let mut server = HttpServer::from_stream(stream);
        server.set_max_size(10);

        // The cap cuts the head off before the request line completes.
        match server.receive_request() {
            Err(Error::MalformedRequestLine(line)) => assert_eq!(line, "GET /a/rat"),
            other => panic!("expected a parse error, got {:?}", other),
        }

        handle.join().unwrap();
    }
}
