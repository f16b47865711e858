//! Wire text encodings
//!
//! The request head is decoded, and the response head encoded, with one
//! configurable encoding. Only the labels this layer meets in practice are
//! supported: UTF-8, US-ASCII, and Latin-1.

use super::{Error, Result};
use std::fmt;

/// Supported header-block encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Ascii,
    Latin1,
}

impl Encoding {
    /// Parse a charset label (case-insensitive)
    pub fn from_label(label: &str) -> Result<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(Error::UnknownEncoding(label.to_string())),
        }
    }

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "us-ascii",
            Encoding::Latin1 => "iso-8859-1",
        }
    }

    /// Decode `bytes` into text
    ///
    /// Fails with the offset of the first offending byte.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_owned).map_err(|e| {
                Error::Decode {
                    encoding: *self,
                    offset: e.valid_up_to(),
                }
            }),
            Encoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(Error::Decode {
                    encoding: *self,
                    offset,
                }),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            // Every byte is a valid Latin-1 character and maps to the
            // Unicode scalar of the same value.
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    /// Encode `text` into bytes
    ///
    /// Fails on the first character the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Ascii => match text.chars().find(|ch| !ch.is_ascii()) {
                Some(ch) => Err(Error::Encode {
                    encoding: *self,
                    ch,
                }),
                None => Ok(text.as_bytes().to_vec()),
            },
            Encoding::Latin1 => text
                .chars()
                .map(|ch| {
                    u8::try_from(ch as u32).map_err(|_| Error::Encode {
                        encoding: *self,
                        ch,
                    })
                })
                .collect(),
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
