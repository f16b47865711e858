//! h1serve - synchronous HTTP/1.1 framing over raw sockets
//!
//! This crate reads a single HTTP/1.1 request head off a blocking socket,
//! parses it, and writes a well-formed response back, optionally streaming
//! a file body. Listener setup and request handling live outside the crate.

pub mod http;
