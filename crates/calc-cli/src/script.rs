//! Key scripts.
//!
//! A script is whitespace-separated key tokens (`7`, `Shift+s`, `Ctrl+m`,
//! `Enter`). `#` starts a comment that runs to the end of the line.

use calc_input::{KeyEvent, KeyParseError};
use thiserror::Error;

/// A token that does not describe a key press.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: invalid key {token:?}")]
pub struct ScriptError {
    pub line: usize,
    pub token: String,
    #[source]
    pub source: KeyParseError,
}

/// Parse script text into key events, in order.
pub fn parse_script(text: &str) -> Result<Vec<KeyEvent>, ScriptError> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let code = line.split_once('#').map_or(line, |(code, _)| code);
        for token in code.split_whitespace() {
            let event = token.parse().map_err(|source| ScriptError {
                line: index + 1,
                token: token.to_string(),
                source,
            })?;
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse command-line key arguments. Each argument may hold several tokens.
pub fn parse_keys<S: AsRef<str>>(args: &[S]) -> Result<Vec<KeyEvent>, ScriptError> {
    let joined = args
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    parse_script(&joined)
}
