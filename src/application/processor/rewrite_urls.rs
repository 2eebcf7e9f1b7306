//! Stylesheet `url(...)` rewriting
//!
//! Relative references in stylesheets point at files under the asset
//! directory. Each one is passed through [`Environment::asset_url`], so in
//! production a fingerprinted image is referenced by its published name.
//!
//! [`Environment::asset_url`]: crate::application::environment::Environment::asset_url

use std::sync::OnceLock;

use regex::Regex;

use super::Template;
use crate::application::environment::Environment;
use crate::error::ConduitResult;

fn url_pattern() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(r#"url\(\s*(['"]?)([^'")]*?)(['"]?)\s*\)"#).expect("Invalid url regex")
    })
}

/// External, inline and already-absolute references are left alone
fn is_rewritable(target: &str) -> bool {
    !(target.is_empty()
        || target.starts_with('/')
        || target.starts_with('#')
        || target.contains(':'))
}

pub(super) fn render(template: &Template, env: &Environment) -> ConduitResult<String> {
    let source = template.data();
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in url_pattern().captures_iter(source) {
        let (Some(whole), Some(target)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        if !is_rewritable(target.as_str())
            || source[..whole.start()].trim_end().ends_with("@import")
        {
            continue;
        }

        let url = env.asset_url(target.as_str())?;
        tracing::trace!(from = target.as_str(), to = %url, "rewriting url");

        out.push_str(&source[last..target.start()]);
        out.push_str(&url);
        last = target.end();
    }

    out.push_str(&source[last..]);
    Ok(out)
}
