//! Text encodings of IDF files.
//!
//! EnergyPlus reads IDFs as ASCII or Latin-1. Files that decode as UTF-8 are
//! kept as UTF-8; anything else is read as Latin-1 and must be written back
//! one byte per character.

use std::borrow::Cow;

/// How an IDF's bytes map to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, which includes plain ASCII
    #[default]
    Utf8,
    /// ISO 8859-1, one byte per character
    Latin1,
}

impl TextEncoding {
    /// Decodes bytes as UTF-8, falling back to Latin-1.
    #[must_use]
    pub fn decode(bytes: Vec<u8>) -> (String, Self) {
        match String::from_utf8(bytes) {
            Ok(text) => (text, Self::Utf8),
            Err(error) => {
                let text = error.into_bytes().into_iter().map(char::from).collect();
                (text, Self::Latin1)
            }
        }
    }

    /// Encodes text in this encoding.
    ///
    /// Latin-1 has no byte for characters past U+00FF; they are written as
    /// `?`.
    #[must_use]
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(text.as_bytes()),
            Self::Latin1 if text.is_ascii() => Cow::Borrowed(text.as_bytes()),
            Self::Latin1 => {
                let mut unmapped = 0_usize;
                let bytes: Vec<u8> = text
                    .chars()
                    .map(|c| {
                        u8::try_from(u32::from(c)).unwrap_or_else(|_| {
                            unmapped += 1;
                            b'?'
                        })
                    })
                    .collect();
                if unmapped > 0 {
                    tracing::warn!(unmapped, "characters outside Latin-1 written as `?`");
                }
                Cow::Owned(bytes)
            }
        }
    }
}
