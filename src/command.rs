use crate::error::Result;
use crate::interpreter::Interpreter;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A command implementation.
///
/// Every command takes the raw remainder of its line (everything after the
/// first space) and is responsible for splitting it itself. Its effect is
/// entirely through the interpreter it receives: printing, writing registers,
/// or importing more commands.
pub type Handler = Rc<dyn Fn(&mut Interpreter, &str) -> Result<()>>;

/// Wrap a function or closure as a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Interpreter, &str) -> Result<()> + 'static,
{
    Rc::new(f)
}

/// A group of related operations that can be merged into the command table.
///
/// Providers are how the instruction set grows: the built-in namespaces are
/// providers seeded at start-up, and `base.import` merges further providers on
/// demand. Operation names starting with `_` are internal and never exported.
pub trait NamespaceProvider {
    /// Namespace prefix, e.g. "io" for `io.write`.
    fn name(&self) -> &str;

    /// `(operation, handler)` pairs exposed by this namespace.
    fn operations(&self) -> Vec<(&'static str, Handler)>;
}

/// Mapping from dotted command names to handlers.
///
/// Registering a name that already exists silently replaces the previous
/// handler.
#[derive(Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, Handler>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a command. Returns `true` if an earlier entry was replaced.
    pub fn register(&mut self, name: impl Into<String>, handler: Handler) -> bool {
        self.entries.insert(name.into(), handler).is_some()
    }

    /// Look up a command. The handler is cheap to clone.
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.entries.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered command names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
