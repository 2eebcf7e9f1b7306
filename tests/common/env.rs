//! Test environment builder for isolated Conduit runs.
//!
//! Provides `TestEnv`: a temp project laid out with the default roots
//! (`app/assets/javascripts`, `app/assets/stylesheets`, `vendor/assets`), a
//! separate temp config home, and helpers to run the `conduit` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Variables cleared before each run so the host shell cannot leak in
const CONDUIT_VARS: &[&str] = &[
    "CONDUIT_ENV",
    "CONDUIT_PUBLIC_DIR",
    "CONDUIT_ASSET_DIR",
    "CONDUIT_ROOTS",
    "CONDUIT_FINGERPRINT",
    "CONDUIT_LOG",
    "RUST_LOG",
];

/// Result of running a Conduit CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l}: {e}")))
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub config_home: TempDir,
    conduit_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path under `app/assets/javascripts`
    pub fn js_path(&self, relative: &str) -> PathBuf {
        self.project_path(&format!("app/assets/javascripts/{relative}"))
    }

    /// Path under `app/assets/stylesheets`
    pub fn css_path(&self, relative: &str) -> PathBuf {
        self.project_path(&format!("app/assets/stylesheets/{relative}"))
    }

    /// Path under `public/assets`
    pub fn public_path(&self, relative: &str) -> PathBuf {
        self.project_path(&format!("public/assets/{relative}"))
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.conduit_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.config_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("NO_COLOR", "1");
        for var in CONDUIT_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute conduit");
        output_to_result(output)
    }

    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        write_file(&self.project_path(relative_path), content);
    }

    pub fn read_project_file(&self, relative_path: &str) -> String {
        let path = self.project_path(relative_path);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Published file names under `public/assets`, sorted, dotfiles included
    pub fn published_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.public_path(""))
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    project_config: Option<String>,
    user_config: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            project_config: None,
            user_config: None,
        }
    }

    /// Add a script under `app/assets/javascripts`
    pub fn with_script(mut self, name: &str, content: &str) -> Self {
        self.files
            .push((format!("app/assets/javascripts/{name}"), content.to_string()));
        self
    }

    /// Add a stylesheet under `app/assets/stylesheets`
    pub fn with_stylesheet(mut self, name: &str, content: &str) -> Self {
        self.files
            .push((format!("app/assets/stylesheets/{name}"), content.to_string()));
        self
    }

    /// Add any file relative to the project root
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Content of `conduit.toml`
    pub fn with_project_config(mut self, content: &str) -> Self {
        self.project_config = Some(content.to_string());
        self
    }

    /// Content of `<config home>/conduit/config.toml`
    pub fn with_user_config(mut self, content: &str) -> Self {
        self.user_config = Some(content.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("Failed to create project dir");
        let config_home = tempfile::tempdir().expect("Failed to create config home");

        for dir in [
            "app/assets/javascripts",
            "app/assets/stylesheets",
            "vendor/assets",
        ] {
            std::fs::create_dir_all(project_root.path().join(dir))
                .expect("Failed to create root");
        }
        // Stops project-root discovery from walking above the temp dir.
        write_file(
            &project_root.path().join("conduit.toml"),
            self.project_config.as_deref().unwrap_or(""),
        );
        if let Some(user) = &self.user_config {
            write_file(&config_home.path().join("conduit/config.toml"), user);
        }
        for (relative, content) in &self.files {
            write_file(&project_root.path().join(relative), content);
        }

        TestEnv {
            project_root,
            config_home,
            conduit_bin: PathBuf::from(env!("CARGO_BIN_EXE_conduit")),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
