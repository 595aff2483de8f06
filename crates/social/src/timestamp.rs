//! Fixed text format for `born_in` timestamps.
//!
//! ISO-8601 date and time without a zone, e.g. `2006-07-27T00:00:00`.
//! Fractional seconds appear only when non-zero and carry up to nine digits,
//! so every `NaiveDateTime` survives a render/parse round trip unchanged.

use core::fmt::Write;

use chrono::NaiveDateTime;

/// `strftime`-style pattern used for both rendering and parsing.
pub const BORN_IN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Render a timestamp in [`BORN_IN_FORMAT`].
pub fn render(at: &NaiveDateTime) -> Result<String, core::fmt::Error> {
    let mut out = String::with_capacity(32);
    write!(out, "{}", at.format(BORN_IN_FORMAT))?;
    Ok(out)
}

/// Parse a timestamp rendered by [`render`].
pub fn parse(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, BORN_IN_FORMAT)
}
