//! Processors
//!
//! A processor turns one [`Template`] into text. Processors are registered per
//! content type in three independent phases (pre, post and bundle) and run in
//! registration order, each output feeding the next.
//!
//! Built-ins are a closed set selected by name when the registries are built;
//! external programs and code-registered [`Processor`] implementations sit
//! beside them in [`ProcessorSpec`].

mod command;
mod directive;
mod import;
mod minify;
mod rewrite_urls;
mod safety_colons;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::session::BuildSession;
use crate::config::ProcessorConfig;
use crate::domain::ports::FileSystem;
use crate::error::{ConduitError, ConduitResult};

pub use minify::{minify_css, minify_js};
pub use safety_colons::add_safety_colon;

/// Per-instance processor options
pub type Options = BTreeMap<String, String>;

/// Render-time variables (`path`, `content_type`, ...)
pub type Variables = BTreeMap<String, String>;

/// Input of one processor run: where the data came from, the data, and options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    data: String,
    options: Options,
}

impl Template {
    /// Read the template data from `path`
    pub fn from_file(fs: &dyn FileSystem, path: &Path, options: Options) -> ConduitResult<Self> {
        if !fs.is_file(path) {
            return Err(ConduitError::not_found(path.display().to_string()));
        }
        let data = fs.read(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
            options,
        })
    }

    /// Take the template data from `supplier`; `path` is only descriptive
    pub fn from_supplier(
        path: impl Into<PathBuf>,
        supplier: impl FnOnce() -> String,
        options: Options,
    ) -> Self {
        Self {
            path: path.into(),
            data: supplier(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn into_data(self) -> String {
        self.data
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// A transformation over one template
pub trait Processor: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str {
        "custom"
    }

    fn render(
        &self,
        template: &Template,
        session: &mut BuildSession<'_>,
        vars: &Variables,
    ) -> ConduitResult<String>;
}

/// What a registered processor is
#[derive(Clone)]
pub enum ProcessorSpec {
    /// Header directives (`//= require ...`)
    Directive,
    /// Stylesheet `@import` inlining
    Import,
    /// Terminate a script with `;`
    SafetyColons,
    /// Route stylesheet `url(...)` references through the asset URL mapping
    RewriteUrls,
    /// Stylesheet minifier
    MinifyCss,
    /// Script minifier
    MinifyJs,
    /// External program: data on stdin, result on stdout
    Command { program: String, args: Vec<String> },
    /// Processor supplied from code
    Custom(Arc<dyn Processor>),
}

impl ProcessorSpec {
    /// Built-in processor by its configuration name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "directive" => Some(Self::Directive),
            "import" => Some(Self::Import),
            "safety-colons" => Some(Self::SafetyColons),
            "rewrite-urls" => Some(Self::RewriteUrls),
            "minify-css" => Some(Self::MinifyCss),
            "minify-js" => Some(Self::MinifyJs),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Directive => "directive",
            Self::Import => "import",
            Self::SafetyColons => "safety-colons",
            Self::RewriteUrls => "rewrite-urls",
            Self::MinifyCss => "minify-css",
            Self::MinifyJs => "minify-js",
            Self::Command { program, .. } => program,
            Self::Custom(processor) => processor.name(),
        }
    }
}

impl fmt::Debug for ProcessorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command { program, args } => f
                .debug_struct("Command")
                .field("program", program)
                .field("args", args)
                .finish(),
            Self::Custom(processor) => f.debug_tuple("Custom").field(&processor.name()).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// A processor plus the options its templates are built with
#[derive(Debug, Clone)]
pub struct ProcessorDescriptor {
    spec: ProcessorSpec,
    options: Options,
}

impl ProcessorDescriptor {
    pub fn new(spec: ProcessorSpec) -> Self {
        Self {
            spec,
            options: Options::new(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Wrap a code-supplied processor
    pub fn custom(processor: impl Processor + 'static) -> Self {
        Self::new(ProcessorSpec::Custom(Arc::new(processor)))
    }

    /// Build a descriptor from a `[[processors.*]]` config entry
    pub fn from_config(config: &ProcessorConfig) -> ConduitResult<Self> {
        let label = config
            .name
            .clone()
            .or_else(|| config.command.clone())
            .unwrap_or_default();

        let spec = match (&config.name, &config.command) {
            (_, Some(program)) if program.trim().is_empty() => {
                return Err(ConduitError::InvalidProcessorSpec {
                    name: label,
                    reason: "command is empty".to_string(),
                });
            }
            (Some(name), Some(_)) if ProcessorSpec::builtin(name).is_some() => {
                return Err(ConduitError::InvalidProcessorSpec {
                    name: label,
                    reason: "a built-in processor cannot also set a command".to_string(),
                });
            }
            (_, Some(program)) => ProcessorSpec::Command {
                program: program.clone(),
                args: config.args.clone(),
            },
            (Some(name), None) => {
                ProcessorSpec::builtin(name).ok_or_else(|| ConduitError::InvalidProcessorSpec {
                    name: name.clone(),
                    reason: "unknown processor and no command given".to_string(),
                })?
            }
            (None, None) => {
                return Err(ConduitError::InvalidProcessorSpec {
                    name: config.content_type.clone(),
                    reason: "entry needs a name or a command".to_string(),
                });
            }
        };

        Ok(Self::new(spec).with_options(config.options.clone()))
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn spec(&self) -> &ProcessorSpec {
        &self.spec
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn render(
        &self,
        template: &Template,
        session: &mut BuildSession<'_>,
        vars: &Variables,
    ) -> ConduitResult<String> {
        match &self.spec {
            ProcessorSpec::Directive => directive::render(template, session),
            ProcessorSpec::Import => import::render(template, session),
            ProcessorSpec::SafetyColons => Ok(add_safety_colon(template.data())),
            ProcessorSpec::RewriteUrls => rewrite_urls::render(template, session.env()),
            ProcessorSpec::MinifyCss => Ok(minify::compress(template, minify_css)),
            ProcessorSpec::MinifyJs => Ok(minify::compress(template, minify_js)),
            ProcessorSpec::Command { program, args } => {
                command::run(program, args, template, vars)
            }
            ProcessorSpec::Custom(processor) => processor.render(template, session, vars),
        }
    }
}

/// Content type → ordered processor list
#[derive(Debug, Clone, Default)]
pub struct ProcessorRegistry {
    processors: BTreeMap<String, Vec<ProcessorDescriptor>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `descriptor` to the list for `content_type`
    pub fn register(&mut self, content_type: &str, descriptor: ProcessorDescriptor) {
        self.processors
            .entry(content_type.to_string())
            .or_default()
            .push(descriptor);
    }

    /// Processors for `content_type`, in registration order
    pub fn all(&self, content_type: &str) -> &[ProcessorDescriptor] {
        self.processors
            .get(content_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.processors.values().all(Vec::is_empty)
    }
}
