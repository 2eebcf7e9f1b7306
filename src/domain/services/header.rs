//! Source header scanner
//!
//! Finds the leading run of comments (and blank lines between them) at the
//! top of a stylesheet or script. Three comment forms are recognized:
//!
//! ```text
//! /* block */        ### block ###        // line   or   # line
//! ```
//!
//! Scanning stops at the first line that is neither blank nor part of one of
//! these comments. The body after that point is never inspected.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Slash,
    Hash,
}

impl Block {
    fn closer(self) -> &'static str {
        match self {
            Block::Slash => "*/",
            Block::Hash => "###",
        }
    }
}

/// Split `source` into `(header, body)` at the end of its comment header
pub fn split_header(source: &str) -> (&str, &str) {
    let end = header_len(source);
    source.split_at(end)
}

/// Byte length of the comment header at the start of `source`
pub fn header_len(source: &str) -> usize {
    let mut offset = 0;
    let mut open: Option<Block> = None;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim();

        if let Some(block) = open {
            if trimmed.contains(block.closer()) {
                open = None;
            }
            offset += line.len();
            continue;
        }

        if trimmed.is_empty() {
            offset += line.len();
        } else if let Some(rest) = trimmed.strip_prefix("/*") {
            if !rest.contains("*/") {
                open = Some(Block::Slash);
            }
            offset += line.len();
        } else if let Some(rest) = trimmed.strip_prefix("###") {
            if !rest.contains("###") {
                open = Some(Block::Hash);
            }
            offset += line.len();
        } else if trimmed.starts_with("//") || trimmed.starts_with('#') {
            offset += line.len();
        } else {
            break;
        }
    }

    offset
}
