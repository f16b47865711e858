//! Socket reader
//!
//! Accumulates bytes from a socket in bounded chunks until the header
//! terminator shows up, the size budget is spent, the peer closes, or the
//! receive times out. A timeout is a normal end of input here, not an error.

use super::session::{Received, SocketOps};
use super::{Result, HEADER_TERMINATOR};
use bytes::{Bytes, BytesMut};

/// Read a request head off a socket
///
/// Requests at most `chunk_size` bytes per receive, capped to what is left of
/// `max_size`, and returns everything accumulated once the terminator is seen
/// in the combined buffer. Bytes past the terminator that arrived in the same
/// chunk are kept. `max_size == 0` disables the budget; `chunk_size == 0`
/// asks for a zero-sized receive, which a real socket answers as end of
/// input.
///
/// When the budget, not the terminator, ends the read, the buffer is
/// truncated to `max_size` even if a receive delivered more than it was
/// asked for.
pub fn read_data<S: SocketOps>(sock: &mut S, chunk_size: usize, max_size: usize) -> Result<Bytes> {
    let mut buf = BytesMut::new();

    loop {
        let want = if max_size == 0 {
            chunk_size
        } else {
            chunk_size.min(max_size - buf.len())
        };

        match sock.recv_chunk(want)? {
            Received::Data(chunk) => buf.extend_from_slice(&chunk),
            Received::TimedOut => {
                tracing::warn!(
                    timeout = ?sock.read_timeout(),
                    buffered = buf.len(),
                    "receive timed out, returning partial head"
                );
                break;
            }
            Received::Closed => break,
        }

        // Scan the combined buffer so a terminator split across chunk
        // boundaries is still found.
        if find_terminator(&buf).is_some() {
            break;
        }

        if max_size != 0 && buf.len() >= max_size {
            buf.truncate(max_size);
            break;
        }
    }

    tracing::debug!(bytes = buf.len(), "request head read");
    Ok(buf.freeze())
}

/// Position of the first `\r\n\r\n` in `buf`
fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}
