//! Stylesheet `@import` expansion
//!
//! `@import "path";` and `@import url(path);` are replaced by the imported
//! file's content. Statements whose target can't be resolved are left alone
//! for the browser to fetch.

use std::sync::OnceLock;

use regex::Regex;

use super::Template;
use crate::application::session::BuildSession;
use crate::error::ConduitResult;

fn import_pattern() -> &'static Regex {
    static IMPORT_REGEX: OnceLock<Regex> = OnceLock::new();
    IMPORT_REGEX.get_or_init(|| {
        Regex::new(r#"@import\s*(?:"([^"]+)"|url\((.+?)\));"#).expect("Invalid import regex")
    })
}

/// The path named by an `url(...)` argument, without surrounding quotes
fn url_target(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')))
        .unwrap_or(raw)
}

pub(super) fn render(template: &Template, session: &mut BuildSession<'_>) -> ConduitResult<String> {
    let source = template.data();
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in import_pattern().captures_iter(source) {
        let Some(statement) = caps.get(0) else {
            continue;
        };
        let target = match (caps.get(1), caps.get(2)) {
            (Some(quoted), _) => quoted.as_str(),
            (None, Some(url)) => url_target(url.as_str()),
            (None, None) => continue,
        };

        out.push_str(&source[last..statement.start()]);
        last = statement.end();

        let resolved = session
            .resolve(target)
            .filter(|path| session.env().fs().is_file(path));
        match resolved {
            Some(path) => {
                tracing::debug!(import = target, resolved = %path.display(), "inlining import");
                out.push_str(&session.import(&path)?);
                out.push('\n');
            }
            None => {
                tracing::debug!(import = target, file = %template.path().display(), "leaving unresolved import");
                out.push_str(statement.as_str());
            }
        }
    }

    out.push_str(&source[last..]);
    Ok(out)
}
