//! Directive parser
//!
//! Extracts `= name args...` directives from a source's comment header:
//!
//! ```text
//! //= require "vendor/jquery"
//! //= require_tree ./widgets
//! /*
//!  *= require reset
//!  */
//! ```

use std::path::Path;

use crate::domain::entities::{Directive, ParsedSource};
use crate::error::{ConduitError, ConduitResult};

use super::header::split_header;

/// Split `source` into header and body and collect the header's directives
///
/// `file` is only used for error reporting.
pub fn parse_source(source: &str, file: &Path) -> ConduitResult<ParsedSource> {
    let (header, body) = split_header(source);

    let mut directives = Vec::new();
    for (index, line) in header.lines().enumerate() {
        let Some(invocation) = directive_invocation(line) else {
            continue;
        };

        let mut words = split_words(invocation).map_err(|message| {
            ConduitError::MalformedArguments {
                file: file.to_path_buf(),
                line: index + 1,
                message,
            }
        })?;

        if words.is_empty() {
            continue;
        }
        let name = words.remove(0);
        directives.push(Directive::new(index, name, words));
    }

    Ok(ParsedSource {
        header: header.to_string(),
        body: body.to_string(),
        directives,
    })
}

/// The `name args...` part of a directive line, if `line` is one
///
/// The line must open with non-word characters (comment markers) that end in
/// `=` plus optional whitespace. A trailing `*/` is dropped.
pub fn directive_invocation(line: &str) -> Option<&str> {
    let start = line.find(|c: char| c.is_alphanumeric() || c == '_')?;
    let prefix = &line[..start];

    let eq = prefix.rfind('=')?;
    if !prefix[eq + 1..].chars().all(char::is_whitespace) {
        return None;
    }

    let rest = line[start..].trim_end();
    let rest = rest.strip_suffix("*/").unwrap_or(rest).trim_end();
    Some(rest)
}

/// Shell-like word splitting
///
/// Whitespace separates words. `'...'` is taken verbatim, `"..."` honours
/// backslash escapes, and a backslash outside quotes takes the next character
/// literally. Quoted and bare parts that touch form one word.
pub fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            '\'' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => word.push(ch),
                        None => return Err(format!("unmatched single quote: {}", line)),
                    }
                }
            }
            '"' => {
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch) => word.push(ch),
                            None => return Err(format!("unmatched double quote: {}", line)),
                        },
                        Some(ch) => word.push(ch),
                        None => return Err(format!("unmatched double quote: {}", line)),
                    }
                }
            }
            '\\' => {
                let word = current.get_or_insert_with(String::new);
                if let Some(ch) = chars.next() {
                    word.push(ch);
                }
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }

    if let Some(word) = current {
        words.push(word);
    }
    Ok(words)
}
