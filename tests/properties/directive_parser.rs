//! Property tests for header splitting and directive parsing.

use std::path::Path;

use proptest::prelude::*;

use conduit::{parse_source, split_header, split_words};

fn bare_word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_./-]{1,12}").unwrap()
}

fn header_line() -> impl Strategy<Value = String> {
    prop_oneof![
        bare_word().prop_map(|w| format!("//= require {w}")),
        bare_word().prop_map(|w| format!("// {w}")),
        bare_word().prop_map(|w| format!("# {w}")),
        Just(String::new()),
        Just("/*\n *= require_tree .\n */".to_string()),
    ]
}

fn body_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}\\(\\);( //= require x)?").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Word splitting never panics on arbitrary input.
    #[test]
    fn property_split_words_never_panics(line in ".{0,80}") {
        let _ = split_words(&line);
    }

    /// PROPERTY: Unquoted words split exactly like whitespace splitting.
    #[test]
    fn property_bare_words_split_on_whitespace(
        words in proptest::collection::vec(bare_word(), 0..6),
        sep in "[ \t]{1,3}",
    ) {
        let line = words.join(&sep);
        prop_assert_eq!(split_words(&line).unwrap(), words);
    }

    /// PROPERTY: A single-quoted argument comes back verbatim.
    #[test]
    fn property_single_quotes_are_verbatim(inner in "[^']{0,20}") {
        let line = format!("require '{inner}'");
        let words = split_words(&line).unwrap();
        prop_assert_eq!(words, vec!["require".to_string(), inner]);
    }

    /// PROPERTY: Header and body always reassemble into the source.
    #[test]
    fn property_split_header_partitions_source(source in ".{0,40}(\n.{0,40}){0,6}") {
        let (header, body) = split_header(&source);
        prop_assert_eq!(format!("{header}{body}"), source);
    }

    /// PROPERTY: Directives only come from the header, and rendering keeps
    /// every line break while leaving the body untouched.
    #[test]
    fn property_render_keeps_lines_and_body(
        header in proptest::collection::vec(header_line(), 0..6),
        body in proptest::collection::vec(body_line(), 1..4),
    ) {
        let mut source = String::new();
        for line in &header {
            source.push_str(line);
            source.push('\n');
        }
        let body = body.join("\n") + "\n";
        source.push_str(&body);

        let parsed = parse_source(&source, Path::new("test.js")).unwrap();
        prop_assert_eq!(&parsed.body, &body);

        let rendered = parsed.render();
        prop_assert!(rendered.ends_with(&body));
        prop_assert_eq!(rendered.matches('\n').count(), source.matches('\n').count());

        let requires = header.iter().filter(|l| l.starts_with("//= require ")).count();
        let trees = header.iter().filter(|l| l.starts_with("/*")).count();
        prop_assert_eq!(parsed.directives.len(), requires + trees);
    }
}
