//! Matching app ids against `mas list` / `mas outdated` output.
//!
//! Both commands print one app per line as `<id> <name> (<version>)`. A line
//! refers to an app when it starts with the id followed by whitespace, so
//! `123` never matches `1234 SomeApp`.
//!
//! The id is placed into the pattern as-is. Ids are numeric in practice; an
//! id carrying regex metacharacters is matched as a pattern, not literally,
//! and an id that is not a valid pattern is an error.

use crate::error::{Error, Result};
use regex::Regex;

fn line_pattern(id: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?m)^{id}\s")).map_err(|source| Error::InvalidId {
        id: id.to_string(),
        source,
    })
}

/// Whether any line of `output` refers to the app `id`.
pub fn references_app(output: &str, id: &str) -> Result<bool> {
    Ok(line_pattern(id)?.is_match(output))
}

/// The first line of `output` referring to the app `id`, without its newline.
pub fn referencing_line<'a>(output: &'a str, id: &str) -> Result<Option<&'a str>> {
    let Some(found) = line_pattern(id)?.find(output) else {
        return Ok(None);
    };
    let rest = &output[found.start()..];
    Ok(Some(rest.lines().next().unwrap_or(rest)))
}
