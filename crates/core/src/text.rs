//! Text helpers for box values typed or displayed by an editor.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{BoxError, Result};
use crate::geometry::FileCoords;

static NCR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#[xX]([0-9a-fA-F]+);|&#([0-9]+);|\\u([0-9a-fA-F]{4})")
        .expect("numeric character reference pattern is valid")
});

/// Decodes numeric character references (`&#233;`, `&#xE9;`) and `\uXXXX`
/// escapes. References that do not name a valid scalar value are kept as
/// written.
pub fn convert_ncr(text: &str) -> Cow<'_, str> {
    NCR.replace_all(text, |caps: &Captures<'_>| {
        let (digits, radix) = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(hex), _, _) => (hex.as_str(), 16),
            (_, Some(dec), _) => (dec.as_str(), 10),
            (_, _, Some(hex)) => (hex.as_str(), 16),
            _ => return caps[0].to_string(),
        };
        u32::from_str_radix(digits, radix)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    })
}

/// Code points of `text` as `U+XXXX`, separated by spaces.
pub fn to_hex(text: &str) -> String {
    text.chars()
        .map(|c| format!("U+{:04X}", u32::from(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A "find" request typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindQuery {
    /// Box text to search for (references already decoded).
    Text(String),
    /// A rectangle in file space: x1 y1 x2 y2.
    Coords(FileCoords),
}

/// Parses a find request: a single token is box text, four integers are
/// file-space coordinates.
pub fn parse_find_query(query: &str) -> Result<FindQuery> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    match tokens.as_slice() {
        [text] => Ok(FindQuery::Text(convert_ncr(text).into_owned())),
        [x1, y1, x2, y2] => {
            let parse = |s: &str| {
                s.parse::<i32>()
                    .map_err(|_| BoxError::InvalidQuery(query.to_string()))
            };
            Ok(FindQuery::Coords((
                parse(*x1)?,
                parse(*y1)?,
                parse(*x2)?,
                parse(*y2)?,
            )))
        }
        _ => Err(BoxError::InvalidQuery(query.to_string())),
    }
}
