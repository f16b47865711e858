//! Socket operations abstraction
//!
//! All framing code reads and writes through the `SocketOps` trait instead of
//! touching a stream directly. `TcpSocket` is the production implementation;
//! tests substitute scripted ones.
//!
//! A receive reports its outcome as a value, not an error: `Received` tags
//! data, timeout, and end-of-stream so callers match on them.

use super::{Error, Result};
use bytes::Bytes;
use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::os::fd::AsRawFd;
use std::time::Duration;

/// Socket operations trait
///
/// This trait defines the operations the framing layer performs on a
/// connection. The production implementation is `TcpSocket`.
pub trait SocketOps {
    /// Receive at most `max` bytes
    fn recv_chunk(&mut self, max: usize) -> Result<Received>;

    /// Write all of `data`, blocking until done
    fn send_all(&mut self, data: &[u8]) -> Result<()>;

    /// The configured receive timeout, if any
    fn read_timeout(&self) -> Option<Duration>;
}

/// Outcome of a single receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// Bytes arrived; never empty
    Data(Bytes),
    /// No data within the configured timeout
    TimedOut,
    /// Peer closed the connection
    Closed,
}

/// Plain TCP socket with poll-based timeouts
///
/// Wraps an accepted `TcpStream`. The stream is never shut down here;
/// connection lifecycle belongs to the caller.
pub struct TcpSocket {
    stream: TcpStream,
    timeout: Option<Duration>,
}

impl TcpSocket {
    /// Wrap a TCP stream with the default 10 second timeout
    pub fn new(stream: TcpStream) -> Self {
        TcpSocket {
            stream,
            timeout: Some(Duration::from_secs(10)),
        }
    }

    /// Set the timeout for receive and send readiness
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    /// Get a reference to the underlying stream
    pub fn stream(&self) -> &TcpStream {
        &self.stream
    }

    /// Get a mutable reference to the underlying stream
    pub fn stream_mut(&mut self) -> &mut TcpStream {
        &mut self.stream
    }

    /// Wait until the stream is ready for `events`
    ///
    /// Returns false if the configured timeout expired first.
    fn poll(&self, events: libc::c_short) -> Result<bool> {
        use libc::{poll, pollfd};

        let mut pfd = pollfd {
            fd: self.stream.as_raw_fd(),
            events,
            revents: 0,
        };

        let timeout_ms = self
            .timeout
            .map(|d| d.as_millis() as i32)
            .unwrap_or(-1); // -1 = infinite

        let result = unsafe { poll(&mut pfd as *mut pollfd, 1, timeout_ms) };

        if result < 0 {
            return Err(Error::Io(io::Error::last_os_error()));
        }

        Ok(result > 0)
    }
}

impl SocketOps for TcpSocket {
    fn recv_chunk(&mut self, max: usize) -> Result<Received> {
        if max == 0 {
            // recv with a zero-sized buffer returns 0, same as EOF
            return Ok(Received::Closed);
        }

        if !self.poll(libc::POLLIN)? {
            return Ok(Received::TimedOut);
        }

        let mut buf = vec![0u8; max];
        let n = self.stream.read(&mut buf)?;
        if n == 0 {
            return Ok(Received::Closed);
        }
        buf.truncate(n);
        Ok(Received::Data(Bytes::from(buf)))
    }

    fn send_all(&mut self, data: &[u8]) -> Result<()> {
        let mut written = 0;
        while written < data.len() {
            if !self.poll(libc::POLLOUT)? {
                return Err(Error::Timeout);
            }
            let n = self.stream.write(&data[written..])?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            written += n;
        }
        Ok(())
    }

    fn read_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
