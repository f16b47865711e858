//! Request head parsing
//!
//! Turns the raw byte buffer from the socket reader into a structured
//! request. The buffer is decoded as a whole with the configured encoding,
//! split on CRLF, and the request line is broken on its first two whitespace
//! runs. Header lines are kept verbatim; nothing past the first empty line is
//! looked at.

use super::encoding::Encoding;
use super::message::Request;
use super::{Error, Result, CRLF};

/// Parse a request head
///
/// `data` is everything the reader accumulated, including any body bytes
/// that arrived with the head; those are ignored here. Decode failures and a
/// request line with fewer than three tokens are distinct errors.
pub fn parse_request(data: &[u8], encoding: Encoding) -> Result<Request> {
    let text = encoding.decode(data)?;
    let mut lines = text.split(CRLF);

    let request_line = lines.next().unwrap_or("");
    let (method, path, version) = split_request_line(request_line)
        .ok_or_else(|| Error::MalformedRequestLine(request_line.to_string()))?;

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            break;
        }
        headers.push(line.to_string());
    }

    Ok(Request::new(method, path, version, headers))
}

/// Split a request line on its first two whitespace runs
///
/// Yields exactly method, path, and version; the third part is the rest of
/// the line, so a version token is never subdivided. Returns None when fewer
/// than three tokens are present.
fn split_request_line(line: &str) -> Option<(String, String, String)> {
    let rest = line.trim_start();

    let method_end = rest.find(char::is_whitespace)?;
    let method = &rest[..method_end];
    let rest = rest[method_end..].trim_start();

    let path_end = rest.find(char::is_whitespace)?;
    let path = &rest[..path_end];
    let rest = rest[path_end..].trim_start();

    if rest.is_empty() {
        return None;
    }

    Some((method.to_string(), path.to_string(), rest.to_string()))
}
