//! Directive handlers
//!
//! Name → handler registry consulted by the directive processor. Handlers act
//! on the [`BuildSession`] of the file whose header named them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::application::session::BuildSession;
use crate::error::ConduitResult;

/// A directive implementation: `(session, args)`
pub type DirectiveHandler =
    Arc<dyn Fn(&mut BuildSession<'_>, &[String]) -> ConduitResult<()> + Send + Sync>;

/// A handler plus the exact argument count it accepts, if fixed
#[derive(Clone)]
pub struct DirectiveEntry {
    pub handler: DirectiveHandler,
    pub arity: Option<usize>,
}

/// Registered directives
#[derive(Clone)]
pub struct DirectiveRegistry {
    entries: BTreeMap<String, DirectiveEntry>,
}

impl DirectiveRegistry {
    /// A registry with no directives at all
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register (or replace) a handler accepting any number of arguments
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut BuildSession<'_>, &[String]) -> ConduitResult<()> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(handler), None);
    }

    /// Register (or replace) a handler that takes exactly `arity` arguments
    pub fn register_with_arity<F>(&mut self, name: &str, arity: usize, handler: F)
    where
        F: Fn(&mut BuildSession<'_>, &[String]) -> ConduitResult<()> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(handler), Some(arity));
    }

    fn insert(&mut self, name: &str, handler: DirectiveHandler, arity: Option<usize>) {
        self.entries
            .insert(name.to_string(), DirectiveEntry { handler, arity });
    }

    pub fn get(&self, name: &str) -> Option<&DirectiveEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for DirectiveRegistry {
    /// `require`, `depend_on` and `require_tree`, one argument each
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_with_arity("require", 1, |session, args| {
            session.require_asset(&args[0])
        });
        registry.register_with_arity("depend_on", 1, |session, args| {
            session.depend_on(&args[0])
        });
        registry.register_with_arity("require_tree", 1, |session, args| {
            session.require_tree(&args[0])
        });
        registry
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
