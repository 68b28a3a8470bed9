//! Decoding of element display names.
//!
//! The editor stores the assignee of a task inside its name, as `[assignee] Visible Name`,
//! where the assignee is either a `0x`-prefixed address or a plain username.

use crate::process::Assignee;

/// Remove every whitespace character, e.g. `Approve Request` becomes `ApproveRequest`
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The visible part of a raw name (everything after the first `]`, if any), without whitespace
pub fn display_name(raw: &str) -> String {
    match raw.split_once(']') {
        Some((_, visible)) => strip_whitespace(visible),
        None => strip_whitespace(raw),
    }
}

/// The assignee embedded in a raw name, if it has one.
/// The token runs from the first `[` up to the next `]` (or the end of the name).
/// An empty tag `[]` names an empty username.
pub fn decode_assignee(raw: &str) -> Option<Assignee> {
    if !raw.contains(']') {
        return None;
    }
    let (_, after_bracket) = raw.split_once('[')?;
    let token = after_bracket
        .split_once(']')
        .map_or(after_bracket, |(token, _)| token);
    if token.starts_with("0x") {
        Some(Assignee::Address(token.to_string()))
    } else {
        Some(Assignee::Username(token.to_string()))
    }
}
