//! Script terminator
//!
//! Concatenated scripts break when one file omits its final semicolon, so
//! every script that doesn't end in `;` gets one.

/// `source` with `;\n` appended unless it is blank or already ends in `;`
pub fn add_safety_colon(source: &str) -> String {
    let trimmed = source.trim_end();
    if trimmed.is_empty() || trimmed.ends_with(';') {
        source.to_string()
    } else {
        format!("{};\n", source)
    }
}
