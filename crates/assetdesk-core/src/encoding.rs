//! Text encoding detection for legacy asset files.
//!
//! Asset files come from tools that wrote UTF-8, Big5 (Traditional Chinese),
//! Windows code page 1252, or plain Latin-1, and none of them carry a marker.
//! [`decode_best`] decodes the bytes with every candidate and keeps the
//! decoding that produced the most CJK characters and the fewest replacement
//! characters.
//!
//! # Example
//!
//! ```
//! use assetdesk_core::encoding::{TextEncoding, decode_best};
//!
//! let decoded = decode_best(b"[main]\nkey = value\n", TextEncoding::PREFERRED);
//! assert_eq!(decoded.encoding, TextEncoding::Utf8);
//! assert_eq!(decoded.text, "[main]\nkey = value\n");
//! ```

use std::fmt;
use std::str::FromStr;

use encoding_rs::{BIG5, EncoderResult, Encoding, WINDOWS_1252};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Score bonus per decoded CJK ideograph.
const CJK_WEIGHT: i64 = 10;

/// Score penalty per replacement character.
const REPLACEMENT_WEIGHT: i64 = 100;

/// Bytes with no cp1252 mapping; `encoding_rs` passes them through as C1
/// controls.
const CP1252_UNDEFINED: [char; 5] = ['\u{81}', '\u{8d}', '\u{8f}', '\u{90}', '\u{9d}'];

/// Encodings understood by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TextEncoding {
    /// UTF-8.
    Utf8,
    /// Big5 (Traditional Chinese).
    Big5,
    /// Windows code page 1252.
    Windows1252,
    /// ISO-8859-1, one byte per code point U+0000..=U+00FF.
    Latin1,
}

impl TextEncoding {
    /// Default detection order.
    pub const PREFERRED: &'static [TextEncoding] = &[
        TextEncoding::Utf8,
        TextEncoding::Big5,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
    ];

    /// Canonical label, as shown to users and stored in config files.
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Big5 => "big5",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode bytes, replacing malformed sequences (and the five cp1252 bytes
/// without a character) with U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Big5 => decode_with(BIG5, bytes),
            TextEncoding::Windows1252 => decode_with(WINDOWS_1252, bytes)
                .chars()
                .map(|c| {
                    if CP1252_UNDEFINED.contains(&c) {
                        char::REPLACEMENT_CHARACTER
                    } else {
                        c
                    }
                })
                .collect(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Encode text. Characters the encoding cannot represent become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Big5 => encode_with(BIG5, text),
            TextEncoding::Windows1252 => encode_with(WINDOWS_1252, text),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "big5" => Ok(TextEncoding::Big5),
            "cp1252" | "windows-1252" => Ok(TextEncoding::Windows1252),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            other => Err(Error::config(format!("Unknown encoding '{other}'"))),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TextEncoding> for String {
    fn from(value: TextEncoding) -> Self {
        value.label().to_string()
    }
}

/// Text decoded from raw bytes together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded content.
    pub text: String,
    /// Encoding chosen by [`decode_best`].
    pub encoding: TextEncoding,
}

/// Decode `bytes` with the best-scoring candidate encoding.
///
/// Each candidate scores `cjk * 10 - replacements * 100`; the first candidate
/// with the highest score wins. With no candidates the bytes are read as
/// Latin-1, which never fails.
pub fn decode_best(bytes: &[u8], candidates: &[TextEncoding]) -> DecodedText {
    let mut best: Option<(i64, DecodedText)> = None;

    for &encoding in candidates {
        let text = encoding.decode(bytes);
        let score = score(&text);
        log::trace!("encoding {encoding} scored {score}");
        if best
            .as_ref()
            .is_none_or(|(best_score, _)| score > *best_score)
        {
            best = Some((score, DecodedText { text, encoding }));
        }
    }

    match best {
        Some((_, decoded)) => decoded,
        None => DecodedText {
            text: TextEncoding::Latin1.decode(bytes),
            encoding: TextEncoding::Latin1,
        },
    }
}

/// Returns whether `c` is a CJK unified or compatibility ideograph.
pub fn is_cjk(c: char) -> bool {
    matches!(c, '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' | '\u{f900}'..='\u{faff}')
}

fn score(text: &str) -> i64 {
    let (cjk, replacements) = text.chars().fold((0i64, 0i64), |(cjk, repl), c| {
        // U+009D is what an undecodable 0x9D usually turns into.
        if c == char::REPLACEMENT_CHARACTER || c == '\u{9d}' {
            (cjk, repl + 1)
        } else if is_cjk(c) {
            (cjk + 1, repl)
        } else {
            (cjk, repl)
        }
    });
    cjk * CJK_WEIGHT - replacements * REPLACEMENT_WEIGHT
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    text.into_owned()
}

fn encode_with(encoding: &'static Encoding, text: &str) -> Vec<u8> {
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 1024];
    let mut src = text;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(src, &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => out.push(b'?'),
        }
    }

    out
}
