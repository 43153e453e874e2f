//! POSIX shell quoting for command traces

use std::borrow::Cow;
use std::ffi::OsStr;

/// Characters that never need quoting in a POSIX shell word
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Quote a single word so that a POSIX shell reads it back unchanged
pub fn quote(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }
    if word.chars().all(is_safe) {
        return Cow::Borrowed(word);
    }
    // close the quote, emit a double-quoted ', reopen
    Cow::Owned(format!("'{}'", word.replace('\'', "'\"'\"'")))
}

/// Quote every word and join them with single spaces
///
/// Words that are not valid UTF-8 are shown lossily; the line is for display.
pub fn join<S: AsRef<OsStr>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| quote(&w.as_ref().to_string_lossy()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
