//! Namespace resolution for `base.import`.
//!
//! The loader knows two kinds of things: *resident* namespace providers,
//! importable by their own name, and *modules*, named bundles of providers
//! that become resident the first time they are loaded.

use crate::command::{Handler, NamespaceProvider};
use crate::error::{CapyError, Result};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Prefix under which modules are looked up.
pub const MODULE_PREFIX: &str = "modules";

/// Builds the providers of a module.
pub type ModuleFactory = fn() -> Vec<Box<dyn NamespaceProvider>>;

#[derive(Default)]
pub struct ExtensionLoader {
    resident: BTreeMap<String, Rc<dyn NamespaceProvider>>,
    modules: BTreeMap<String, ModuleFactory>,
}

impl ExtensionLoader {
    /// A loader that knows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a provider resident. A provider with the same name is replaced.
    pub fn add_namespace(&mut self, provider: Rc<dyn NamespaceProvider>) {
        self.resident.insert(provider.name().to_string(), provider);
    }

    /// Make a module available as `modules.<name>`.
    pub fn add_module(&mut self, name: &str, factory: ModuleFactory) {
        self.modules.insert(format!("{MODULE_PREFIX}.{name}"), factory);
    }

    pub fn is_resident(&self, namespace: &str) -> bool {
        self.resident.contains_key(namespace)
    }

    /// Work out which commands importing `namespace` adds.
    ///
    /// A resident provider wins; otherwise the module `modules.<namespace>` is
    /// loaded, all of its providers become resident, and each contributes
    /// `ProviderName.op` commands.
    pub fn resolve(&mut self, namespace: &str) -> Result<Vec<(String, Handler)>> {
        if let Some(provider) = self.resident.get(namespace) {
            return Ok(exports(provider.as_ref()));
        }

        let key = format!("{MODULE_PREFIX}.{namespace}");
        let factory = *self
            .modules
            .get(&key)
            .ok_or_else(|| CapyError::ModuleNotFound(namespace.to_string()))?;

        let mut commands = Vec::new();
        for provider in factory() {
            let provider: Rc<dyn NamespaceProvider> = Rc::from(provider);
            log::debug!("module {key} provides namespace {}", provider.name());
            commands.extend(exports(provider.as_ref()));
            self.add_namespace(provider);
        }
        Ok(commands)
    }
}

/// Public operations of a provider as fully qualified commands.
fn exports(provider: &dyn NamespaceProvider) -> Vec<(String, Handler)> {
    provider
        .operations()
        .into_iter()
        .filter(|(op, _)| !op.starts_with('_'))
        .map(|(op, h)| (format!("{}.{}", provider.name(), op), h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::handler;

    struct Fake {
        name: &'static str,
        ops: &'static [&'static str],
    }

    impl NamespaceProvider for Fake {
        fn name(&self) -> &str {
            self.name
        }

        fn operations(&self) -> Vec<(&'static str, Handler)> {
            self.ops
                .iter()
                .map(|op| (*op, handler(|_, _| Ok(()))))
                .collect()
        }
    }

    fn names(commands: &[(String, Handler)]) -> Vec<&str> {
        let mut v: Vec<&str> = commands.iter().map(|(n, _)| n.as_str()).collect();
        v.sort();
        v
    }

    fn shapes() -> Vec<Box<dyn NamespaceProvider>> {
        vec![
            Box::new(Fake {
                name: "circle",
                ops: &["area"],
            }),
            Box::new(Fake {
                name: "square",
                ops: &["area", "side"],
            }),
        ]
    }

    #[test]
    fn test_resident_namespace_skips_internal_ops() {
        let mut loader = ExtensionLoader::new();
        loader.add_namespace(Rc::new(Fake {
            name: "greet",
            ops: &["hello", "_secret"],
        }));

        let commands = loader.resolve("greet").unwrap();
        assert_eq!(names(&commands), ["greet.hello"]);
    }

    #[test]
    fn test_module_registers_every_provider() {
        let mut loader = ExtensionLoader::new();
        loader.add_module("shapes", shapes);

        let commands = loader.resolve("shapes").unwrap();
        assert_eq!(
            names(&commands),
            ["circle.area", "square.area", "square.side"]
        );
    }

    #[test]
    fn test_module_providers_become_resident() {
        let mut loader = ExtensionLoader::new();
        loader.add_module("shapes", shapes);

        assert!(matches!(
            loader.resolve("square"),
            Err(CapyError::ModuleNotFound(_))
        ));
        loader.resolve("shapes").unwrap();
        assert!(loader.is_resident("square"));

        let commands = loader.resolve("square").unwrap();
        assert_eq!(names(&commands), ["square.area", "square.side"]);
    }

    #[test]
    fn test_unknown_namespace_is_module_not_found() {
        let mut loader = ExtensionLoader::new();
        match loader.resolve("nothing") {
            Err(CapyError::ModuleNotFound(name)) => assert_eq!(name, "nothing"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected ModuleNotFound"),
        }
    }
}
