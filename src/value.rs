//! Primitive values accepted by the store, with their storage encoding,
//! their history repr, and the decoders used on the way back out.

use std::fmt::Write;

use crate::error::{Error, Result};

// == Value ==
/// A value of one of the supported primitive types.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Real(f64),
}

impl Value {
    // == Encoding ==
    /// Bytes written to the store.
    ///
    /// Text is UTF-8, bytes are raw, numbers are their decimal text.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Text(text) => text.as_bytes().to_vec(),
            Value::Bytes(raw) => raw.clone(),
            Value::Integer(n) => n.to_string().into_bytes(),
            Value::Real(x) => real_text(*x).into_bytes(),
        }
    }

    // == Repr ==
    /// Human-readable literal form used in call history, e.g. `'abc'`,
    /// `b'\x00'`, `42`, `3.5`.
    pub fn repr(&self) -> String {
        match self {
            Value::Text(text) => repr_text(text),
            Value::Bytes(raw) => repr_bytes(raw),
            Value::Integer(n) => n.to_string(),
            Value::Real(x) => real_text(*x),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Vec<u8>> for Value {
    fn from(raw: Vec<u8>) -> Self {
        Value::Bytes(raw)
    }
}

impl From<&[u8]> for Value {
    fn from(raw: &[u8]) -> Self {
        Value::Bytes(raw.to_vec())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

/// Shortest decimal text that parses back to the same float; always
/// carries a fractional part or exponent so it reads as a real.
///
/// Exponents are signed and at least two digits wide: `1e+16`, `1.5e-07`.
fn real_text(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }

    let text = format!("{x:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Picks the quote character the way a literal printer would: single quotes
/// unless the content has a single quote and no double quote.
fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

// == Text Repr ==
/// Quoted, escaped form of a text value.
pub fn repr_text(text: &str) -> String {
    let quote = pick_quote(text.contains('\''), text.contains('"'));
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xff {
                    let _ = write!(out, "\\x{code:02x}");
                } else {
                    let _ = write!(out, "\\u{code:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// == Bytes Repr ==
/// `b`-prefixed, quoted form of a byte value; non-printable bytes as `\xNN`.
pub fn repr_bytes(raw: &[u8]) -> String {
    let quote = pick_quote(raw.contains(&b'\''), raw.contains(&b'"'));
    let mut out = String::with_capacity(raw.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in raw {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push(quote);
    out
}

// == Decoders ==
/// Decodes stored bytes as UTF-8 text.
pub fn decode_text(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|err| Error::Decode(err.to_string()))
}

/// Decodes stored bytes as a decimal integer.
pub fn decode_integer(raw: Vec<u8>) -> Result<i64> {
    let text = decode_text(raw)?;
    text.trim()
        .parse()
        .map_err(|_| Error::Decode(format!("not an integer: {text:?}")))
}

/// Decodes stored bytes as a real number.
pub fn decode_real(raw: Vec<u8>) -> Result<f64> {
    let text = decode_text(raw)?;
    text.trim()
        .parse()
        .map_err(|_| Error::Decode(format!("not a real number: {text:?}")))
}
