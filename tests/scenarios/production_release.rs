//! Scenario: Production Release
//!
//! Journey: CI builds fingerprinted bundles and templates link to them.
//!
//! Steps:
//! 1. CI runs `conduit --production build ...`
//! 2. Compressed bundles are written as `<name>-<digest>.<ext>`
//! 3. The manifest maps each asset name to its published name
//! 4. `tag` and later builds reuse the manifest entry
//! 5. `clear-manifest` forces the next build to publish again
//!
//! Success Criteria:
//! - Fingerprinted names carry a 64-character hex digest
//! - The manifest survives between invocations
//! - The production asset directory setting is honoured

use crate::common::*;

fn is_fingerprinted(name: &str, stem: &str, extension: &str) -> bool {
    let Some(rest) = name.strip_prefix(&format!("{stem}-")) else {
        return false;
    };
    let Some(digest) = rest.strip_suffix(extension) else {
        return false;
    };
    digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit())
}

fn manifest(env: &TestEnv, relative: &str) -> serde_json::Value {
    serde_json::from_str(&env.read_project_file(relative)).unwrap()
}

/// SCENARIO: Production build fingerprints and records in the manifest
#[test]
fn scenario_production_build_fingerprints() {
    let env = TestEnv::builder()
        .with_script("application.js", APPLICATION_JS)
        .with_script("jquery.js", JQUERY_JS)
        .with_script("app/widgets.js", WIDGETS_JS)
        .build();

    let result = env.run(&["--production", "build", "application.js"]);
    assert!(result.success, "build failed: {}", result.combined_output());

    let published = result.stdout.trim().strip_prefix("assets/").unwrap().to_string();
    assert!(
        is_fingerprinted(&published, "application", ".js"),
        "unexpected name {published}"
    );
    assert!(env.public_path(&published).is_file());

    let manifest = manifest(&env, "public/assets/.manifest.json");
    assert_eq!(manifest["application.js"], published.as_str());
}

/// SCENARIO: Compressed bundles still define every global they ship
#[test]
fn scenario_production_bundle_keeps_globals() {
    let env = TestEnv::builder()
        .with_script("application.js", "//= require helpers\nvar ready = greet('app');\n")
        .with_script(
            "helpers.js",
            "function greet(name) {\n  return 'hi ' + name;\n}\nvar VERSION = '1.0';\n",
        )
        .build();

    let result = env.run(&["--production", "build", "application.js"]);
    assert!(result.success, "build failed: {}", result.combined_output());

    let published = result.stdout.trim().to_string();
    let body = std::fs::read_to_string(env.public_path(published.strip_prefix("assets/").unwrap()))
        .unwrap();
    assert!(body.contains("function greet("), "{body}");
    assert!(body.contains("VERSION"), "{body}");
    assert!(body.contains("ready"), "{body}");
}

/// SCENARIO: Multi-dot names keep their inner extensions when fingerprinted
#[test]
fn scenario_multi_dot_name_is_fingerprinted_before_last_extension() {
    let env = TestEnv::builder()
        .with_script("jquery.min.js", JQUERY_JS)
        .build();

    let result = env.run(&["--production", "build", "jquery.min.js"]);
    assert!(result.success, "build failed: {}", result.combined_output());

    let published = result.stdout.trim().strip_prefix("assets/").unwrap().to_string();
    assert!(
        is_fingerprinted(&published, "jquery.min", ".js"),
        "unexpected name {published}"
    );
    assert_eq!(
        manifest(&env, "public/assets/.manifest.json")["jquery.min.js"],
        published.as_str()
    );
}

/// SCENARIO: A second production build is answered from the manifest
#[test]
fn scenario_manifest_short_circuits_rebuild() {
    let env = TestEnv::builder()
        .with_script("application.js", "boot();\n")
        .build();

    let first = env.run(&["--production", "build", "application.js"]);
    assert!(first.success, "build failed: {}", first.combined_output());

    // The source changes, but the recorded name still wins.
    env.write_project_file("app/assets/javascripts/application.js", "boot(2);\n");
    let second = env.run(&["--production", "build", "application.js"]);
    assert!(second.success);
    assert_eq!(first.stdout, second.stdout);

    let cleared = env.run(&["--production", "clear-manifest"]);
    assert!(cleared.success, "{}", cleared.combined_output());
    assert!(cleared.stdout.starts_with("Removed "));
    assert!(!env.public_path(".manifest.json").exists());

    let third = env.run(&["--production", "build", "application.js"]);
    assert!(third.success);
    assert_ne!(first.stdout, third.stdout);
}

/// SCENARIO: Tag links to the fingerprinted stylesheet
#[test]
fn scenario_production_tag() {
    let env = TestEnv::builder()
        .with_stylesheet("site.css", "a { color: red; }\n")
        .build();

    let result = env.run(&["--production", "tag", "site.css"]);
    assert!(result.success, "tag failed: {}", result.combined_output());

    let tag = result.stdout.trim();
    let href = tag
        .strip_prefix(r#"<link rel="stylesheet" href="/assets/"#)
        .and_then(|rest| rest.strip_suffix(r#"">"#))
        .unwrap_or_else(|| panic!("unexpected tag {tag}"));
    assert!(is_fingerprinted(href, "site", ".css"), "unexpected href {href}");
}

/// SCENARIO: Environment named in config with its own asset directory
#[test]
fn scenario_production_asset_dir_from_config() {
    let env = TestEnv::builder()
        .with_script("app.js", "run();\n")
        .with_project_config(
            "[environment]\nname = \"prod\"\n\n[output]\nproduction_asset_dir = \"release\"\n",
        )
        .build();

    let result = env.run(&["build", "app.js"]);
    assert!(result.success, "build failed: {}", result.combined_output());
    assert!(result.stdout.starts_with("release/app-"));

    let manifest = manifest(&env, "public/release/.manifest.json");
    assert!(manifest["app.js"].as_str().unwrap().starts_with("app-"));
}

/// SCENARIO: CONDUIT_ENV selects production without touching config
#[test]
fn scenario_environment_variable_selects_production() {
    let env = TestEnv::builder()
        .with_script("app.js", "run();\n")
        .build();

    let result = env.run_with_env(&["build", "app.js"], &[("CONDUIT_ENV", "production")]);
    assert!(result.success, "build failed: {}", result.combined_output());
    let published = result.stdout.trim().strip_prefix("assets/").unwrap();
    assert!(is_fingerprinted(published, "app", ".js"), "unexpected {published}");
}
