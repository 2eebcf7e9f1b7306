//! Content type table
//!
//! Maps normalized file extensions (`.css`) to content types (`text/css`).
//! Declaration order matters: it is the extension precedence used when
//! resolving logical paths without an extension.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const TEXT_CSS: &str = "text/css";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";

/// Standardize an extension: lowercase with a leading dot
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Byte offset of the first extension separator
///
/// The first character is skipped so a dotfile's leading dot is not a
/// separator.
fn first_separator(file_name: &str) -> Option<usize> {
    file_name
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '.')
        .map(|(pos, _)| pos)
}

/// All extensions of a file name, normalized, in order of appearance
///
/// A leading dot (dotfile) is not treated as an extension separator.
pub fn file_extensions(file_name: &str) -> Vec<String> {
    match first_separator(file_name) {
        Some(pos) => file_name[pos + 1..]
            .split('.')
            .filter(|ext| !ext.is_empty())
            .map(normalize_extension)
            .collect(),
        None => Vec::new(),
    }
}

/// File name up to (not including) its first extension separator
pub fn file_stem_all(file_name: &str) -> &str {
    match first_separator(file_name) {
        Some(pos) => &file_name[..pos],
        None => file_name,
    }
}

/// `file_name` with `-<digest>` inserted before its final extension
///
/// `jquery.min.js` becomes `jquery.min-<digest>.js`; a name without an
/// extension gets the digest appended.
pub fn digest_file_name(file_name: &str, digest: &str) -> String {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => format!("{}-{}{}", &file_name[..pos], digest, &file_name[pos..]),
        _ => format!("{}-{}", file_name, digest),
    }
}

/// Ordered extension → content type table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypes {
    entries: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a mapping; new extensions go to the end
    pub fn insert(&mut self, ext: &str, content_type: impl Into<String>) {
        let ext = normalize_extension(ext);
        let content_type = content_type.into();
        match self.entries.iter_mut().find(|(e, _)| *e == ext) {
            Some(entry) => entry.1 = content_type,
            None => self.entries.push((ext, content_type)),
        }
    }

    /// Content type for an extension (with or without leading dot)
    pub fn get(&self, ext: &str) -> Option<&str> {
        let ext = normalize_extension(ext);
        self.entries
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, t)| t.as_str())
    }

    pub fn contains(&self, ext: &str) -> bool {
        self.get(ext).is_some()
    }

    /// Extensions in precedence order
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(e, _)| e.as_str())
    }

    /// The first of `extensions` present in the table
    pub fn format_extension<'a>(&self, extensions: &'a [String]) -> Option<&'a str> {
        extensions
            .iter()
            .find(|ext| self.contains(ext))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        let mut types = Self::empty();
        types.insert(".css", TEXT_CSS);
        types.insert(".js", APPLICATION_JAVASCRIPT);
        types.insert(".jpeg", "image/jpeg");
        types.insert(".jpg", "image/jpeg");
        types.insert(".png", "image/png");
        types.insert(".gif", "image/gif");
        types
    }
}

impl Serialize for ContentTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ext, content_type) in &self.entries {
            map.serialize_entry(ext, content_type)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContentTypes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ContentTypesVisitor;

        impl<'de> Visitor<'de> for ContentTypesVisitor {
            type Value = ContentTypes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of extension = \"content/type\"")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut types = ContentTypes::empty();
                while let Some((ext, content_type)) = map.next_entry::<String, String>()? {
                    types.insert(&ext, content_type);
                }
                Ok(types)
            }
        }

        deserializer.deserialize_map(ContentTypesVisitor)
    }
}
