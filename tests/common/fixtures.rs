//! Test fixtures - reusable source snippets.

/// Application script requiring two libraries
pub const APPLICATION_JS: &str = "//= require jquery\n//= require app/widgets\nboot();\n";

pub const JQUERY_JS: &str = "var $ = {};\n";

pub const WIDGETS_JS: &str = "//= require jquery\nwidgets($);\n";

/// Stylesheet with a directive header and an inline import
pub const APPLICATION_CSS: &str =
    "/*\n *= require reset\n */\n@import \"typography.css\";\nbody { color: red; }\n";

pub const RESET_CSS: &str = "* { margin: 0; }\n";

pub const TYPOGRAPHY_CSS: &str = "h1 { font-size: 2em; }\n";

/// Script naming a directive nobody registered
pub const BOGUS_DIRECTIVE_JS: &str = "//= bogus foo\nx();\n";
