//! Build session
//!
//! One session exists per file being evaluated. Sessions spawned while
//! building a single top-level asset share one [`VisitTable`], which is how a
//! file required along several paths is included only once and how a require
//! chain that loops back is caught.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::application::environment::Environment;
use crate::application::processor::{
    ProcessorDescriptor, ProcessorSpec, Template, Variables,
};
use crate::error::{ConduitError, ConduitResult};

/// Where a path is in the current build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    InProgress,
    Done,
}

/// Visit marks for every path touched by one top-level build
#[derive(Debug, Default)]
pub struct VisitTable {
    states: HashMap<PathBuf, VisitState>,
    importing: Vec<PathBuf>,
}

impl VisitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, path: &Path) -> Option<VisitState> {
        self.states.get(path).copied()
    }

    pub fn mark_in_progress(&mut self, path: PathBuf) {
        self.states.insert(path, VisitState::InProgress);
    }

    pub fn mark_done(&mut self, path: PathBuf) {
        self.states.insert(path, VisitState::Done);
    }

    /// Paths fully included so far
    pub fn done(&self) -> impl Iterator<Item = &Path> {
        self.states
            .iter()
            .filter(|(_, state)| **state == VisitState::Done)
            .map(|(path, _)| path.as_path())
    }
}

/// Evaluation state for one file
pub struct BuildSession<'a> {
    env: &'a Environment,
    file: PathBuf,
    required: &'a mut VisitTable,
    dependency_paths: Vec<PathBuf>,
    dependency_assets: Vec<String>,
}

impl<'a> BuildSession<'a> {
    pub fn new(env: &'a Environment, file: PathBuf, required: &'a mut VisitTable) -> Self {
        Self {
            env,
            file,
            required,
            dependency_paths: Vec::new(),
            dependency_assets: Vec::new(),
        }
    }

    pub fn env(&self) -> &'a Environment {
        self.env
    }

    /// The file this session evaluates
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Files whose modification affects the output, in discovery order
    pub fn dependency_paths(&self) -> &[PathBuf] {
        &self.dependency_paths
    }

    /// Rendered bodies of required files, in first-required order
    pub fn dependency_assets(&self) -> &[String] {
        &self.dependency_assets
    }

    pub fn into_parts(self) -> (Vec<PathBuf>, Vec<String>) {
        (self.dependency_paths, self.dependency_assets)
    }

    /// Resolve `path` as seen from the current file
    ///
    /// `./name` is looked up next to the current file, everything else goes
    /// through the search roots. Directory index files with the current
    /// file's format extension are preferred.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let preferred = self.env.format_extension(&self.file);
        let preferred = preferred.as_deref();
        let fs = self.env.fs();
        let resolver = self.env.resolver();

        match self.relative_part(path) {
            Some(relative) => {
                let dir = self.file.parent()?;
                resolver.resolve_in(fs, dir, relative, preferred)
            }
            None => resolver.resolve_preferring(fs, path, preferred),
        }
    }

    fn relative_part<'p>(&self, path: &'p str) -> Option<&'p str> {
        if path == "." {
            return Some("");
        }
        path.strip_prefix("./").or_else(|| path.strip_prefix(".\\"))
    }

    /// Record `path` as a freshness dependency without including it
    pub fn depend_on(&mut self, path: &str) -> ConduitResult<()> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| ConduitError::not_found(path))?;
        tracing::debug!(path, resolved = %resolved.display(), "depend_on");
        self.dependency_paths.push(resolved);
        Ok(())
    }

    /// Run `data` (or the file at `path`) through `processors`
    ///
    /// Processors see a nested session that shares this session's visit
    /// table; what they collect is merged back here afterwards.
    pub fn evaluate(
        &mut self,
        path: &Path,
        data: Option<String>,
        processors: &[&ProcessorDescriptor],
    ) -> ConduitResult<String> {
        let mut data = match data {
            Some(data) => data,
            None => Template::from_file(self.env.fs(), path, Default::default())?.into_data(),
        };
        let vars = self.env.variables_for(path);

        let (paths, assets) = {
            let mut nested = BuildSession::new(self.env, path.to_path_buf(), &mut *self.required);
            for descriptor in processors {
                let input = std::mem::take(&mut data);
                let template =
                    Template::from_supplier(path, move || input, descriptor.options().clone());
                data = descriptor.render(&template, &mut nested, &vars)?;
            }
            nested.into_parts()
        };

        self.dependency_paths.extend(paths);
        self.dependency_assets.extend(assets);
        Ok(data)
    }

    /// Include the file at `path` once per build, ahead of the current file
    pub fn require_asset(&mut self, path: &str) -> ConduitResult<()> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| ConduitError::not_found(path))?;
        self.require_resolved(resolved)
    }

    fn require_resolved(&mut self, resolved: PathBuf) -> ConduitResult<()> {
        match self.required.state(&resolved) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::InProgress) => {
                return Err(ConduitError::CyclicDependency { path: resolved });
            }
            None => {}
        }

        tracing::debug!(
            path = %resolved.display(),
            from = %self.file.display(),
            "requiring asset"
        );
        self.required.mark_in_progress(resolved.clone());
        self.dependency_paths.push(resolved.clone());

        let processors = self.env.processors_for(&resolved);
        let body = self.evaluate(&resolved, None, &processors)?;
        self.dependency_assets.push(body);

        self.required.mark_done(resolved);
        Ok(())
    }

    /// Require every file directly inside the directory `path`, by name
    ///
    /// Dotfiles, sub-directories and the current file are skipped.
    pub fn require_tree(&mut self, path: &str) -> ConduitResult<()> {
        let env = self.env;
        let fs = env.fs();
        let dir = match self.relative_part(path) {
            Some(relative) => self
                .file
                .parent()
                .map(|parent| parent.join(relative))
                .filter(|dir| fs.is_dir(dir))
                .map(|dir| fs.canonicalize(&dir).unwrap_or(dir)),
            None => env.resolver().resolve_directory(fs, path),
        }
        .ok_or_else(|| ConduitError::not_found(path))?;

        self.dependency_paths.push(dir.clone());

        for entry in fs.read_dir(&dir)? {
            if entry.is_dir || entry.file_name().starts_with('.') {
                continue;
            }
            let entry_path = fs.canonicalize(&entry.path).unwrap_or(entry.path);
            if entry_path == self.file {
                continue;
            }
            self.require_resolved(entry_path)?;
        }
        Ok(())
    }

    /// Content of the stylesheet at `resolved` with its own imports expanded
    pub(crate) fn import(&mut self, resolved: &Path) -> ConduitResult<String> {
        if resolved == self.file || self.required.importing.iter().any(|p| p == resolved) {
            return Err(ConduitError::CyclicDependency {
                path: resolved.to_path_buf(),
            });
        }
        self.dependency_paths.push(resolved.to_path_buf());

        self.required.importing.push(resolved.to_path_buf());
        let import = ProcessorDescriptor::new(ProcessorSpec::Import);
        let result = self.evaluate(resolved, None, &[&import]);
        self.required.importing.pop();
        result
    }
}

/// Top-level build of `path`: returns the final body and its dependencies
///
/// `path` is marked in progress before its processors run, so anything that
/// requires it again is a cycle.
pub fn build(
    env: &Environment,
    path: &Path,
    processors: &[&ProcessorDescriptor],
) -> ConduitResult<(String, Vec<PathBuf>)> {
    let mut visits = VisitTable::new();
    visits.mark_in_progress(path.to_path_buf());

    let mut session = BuildSession::new(env, path.to_path_buf(), &mut visits);
    let own = session.evaluate(path, None, processors)?;
    let (dependency_paths, dependency_assets) = session.into_parts();

    let mut body = String::with_capacity(
        dependency_assets.iter().map(|a| a.len() + 1).sum::<usize>() + own.len(),
    );
    for asset in &dependency_assets {
        body.push_str(asset);
        body.push('\n');
    }
    body.push_str(&own);

    Ok((body, dependency_paths))
}

/// Render variables for evaluating `path`
pub(crate) fn variables(path: &Path, content_type: Option<&str>) -> Variables {
    let mut vars = Variables::new();
    vars.insert("path".to_string(), path.display().to_string());
    if let Some(dir) = path.parent() {
        vars.insert("dir".to_string(), dir.display().to_string());
    }
    if let Some(content_type) = content_type {
        vars.insert("content_type".to_string(), content_type.to_string());
    }
    vars
}
