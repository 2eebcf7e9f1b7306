//! Scenario: Development Build
//!
//! Journey: A developer edits scripts and stylesheets and rebuilds.
//!
//! Steps:
//! 1. Sources declare their dependencies in header comments
//! 2. Developer runs `conduit build`
//! 3. Bundles land under public/assets with their own names
//! 4. Rebuilding after an edit picks up the change
//!
//! Success Criteria:
//! - Dependencies precede the requiring file, each exactly once
//! - Stylesheet imports are inlined where they were written
//! - No manifest is written outside production

use std::time::{Duration, SystemTime};

use crate::common::*;

fn project() -> TestEnv {
    TestEnv::builder()
        .with_script("application.js", APPLICATION_JS)
        .with_script("jquery.js", JQUERY_JS)
        .with_script("app/widgets.js", WIDGETS_JS)
        .with_stylesheet("application.css", APPLICATION_CSS)
        .with_stylesheet("reset.css", RESET_CSS)
        .with_stylesheet("typography.css", TYPOGRAPHY_CSS)
        .build()
}

/// SCENARIO: Script bundle hoists each dependency once, in first-required order
#[test]
fn scenario_script_bundle_orders_dependencies() {
    let env = project();

    let result = env.run(&["build", "application.js"]);
    assert!(result.success, "build failed: {}", result.combined_output());
    assert_eq!(result.stdout.trim(), "assets/application.js");

    assert_eq!(
        env.read_project_file("public/assets/application.js"),
        "var $ = {};\n\n\nwidgets($);\n\n\n\nboot();\n"
    );
    assert_eq!(env.published_files(), vec!["application.js"]);
}

/// SCENARIO: Stylesheet bundle requires a reset and inlines an import
#[test]
fn scenario_stylesheet_bundle_inlines_imports() {
    let env = project();

    let result = env.run(&["build", "application.css"]);
    assert!(result.success, "build failed: {}", result.combined_output());

    let css = env.read_project_file("public/assets/application.css");
    assert!(css.starts_with("* { margin: 0; }\n"), "got:\n{css}");
    assert!(!css.contains("@import"), "got:\n{css}");
    assert!(css.contains("h1 { font-size: 2em; }"));
    let typography = css.find("h1 {").unwrap();
    let body = css.find("body {").unwrap();
    assert!(typography < body, "import should stay in place:\n{css}");
}

/// SCENARIO: Several assets in one invocation
#[test]
fn scenario_build_many_assets() {
    let env = project();

    let result = env.run(&["build", "application.js", "application.css"]);
    assert!(result.success, "build failed: {}", result.combined_output());
    assert_eq!(
        result.stdout.lines().collect::<Vec<_>>(),
        vec!["assets/application.js", "assets/application.css"]
    );
    assert_eq!(
        env.published_files(),
        vec!["application.css", "application.js"]
    );
}

/// SCENARIO: Editing a dependency rebuilds the bundle
#[test]
fn scenario_rebuild_after_dependency_edit() {
    let env = project();
    assert!(env.run(&["build", "application.js"]).success);

    env.write_project_file("app/assets/javascripts/jquery.js", "var $ = { v: 2 };\n");
    let future = SystemTime::now() + Duration::from_secs(60);
    std::fs::File::options()
        .write(true)
        .open(env.js_path("jquery.js"))
        .unwrap()
        .set_modified(future)
        .unwrap();

    let result = env.run(&["build", "application.js"]);
    assert!(result.success, "rebuild failed: {}", result.combined_output());
    assert!(env
        .read_project_file("public/assets/application.js")
        .starts_with("var $ = { v: 2 };\n"));
}

/// SCENARIO: `show` prints the body without writing anything
#[test]
fn scenario_show_does_not_publish() {
    let env = project();

    let result = env.run(&["show", "application.js"]);
    assert!(result.success, "show failed: {}", result.combined_output());
    assert_eq!(result.stdout, "var $ = {};\n\n\nwidgets($);\n\n\n\nboot();\n");
    assert!(env.published_files().is_empty());
}

/// SCENARIO: `deps` lists what the bundle was built from
#[test]
fn scenario_deps_lists_dependencies_in_order() {
    let env = project();

    let result = env.run(&["deps", "application.js", "--json"]);
    assert!(result.success, "deps failed: {}", result.combined_output());

    let events = result.events();
    let report = events.last().unwrap();
    assert_eq!(report["content_type"], "application/javascript");
    assert_eq!(report["digest"].as_str().unwrap().len(), 64);

    let dependencies: Vec<&str> = report["dependencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(dependencies.len(), 2);
    assert!(dependencies[0].ends_with("jquery.js"));
    assert!(dependencies[1].ends_with("widgets.js"));
}
