use crate::resolver;
use crate::value::Value;
use std::collections::BTreeMap;

/// The register store: every variable a script has written.
///
/// Registers are created on first write and overwritten on later writes,
/// possibly with a value of a different kind. They are never removed and
/// there is no scoping, so every command sees every register.
#[derive(Debug, Clone, Default)]
pub struct Registers {
    values: BTreeMap<String, Value>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current value of a register.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Create or overwrite a register. Last write wins.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All registers, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Expand `$name` and `${name}` references in `template`.
    ///
    /// See [`resolver::resolve`].
    pub fn resolve(&self, template: &str) -> String {
        resolver::resolve(template, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut regs = Registers::new();

        // initially absent
        assert_eq!(regs.get("x"), None);

        regs.set("x", 5i64);
        assert_eq!(regs.get("x"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_last_write_wins_across_kinds() {
        let mut regs = Registers::new();
        regs.set("x", "five");
        regs.set("x", 5.0);

        assert_eq!(regs.len(), 1);
        assert_eq!(regs.get("x"), Some(&Value::Float(5.0)));
    }

    #[test]
    fn test_iter_is_ordered_by_name() {
        let mut regs = Registers::new();
        regs.set("b", 2i64);
        regs.set("a", 1i64);
        regs.set("c", 3i64);

        let names: Vec<&str> = regs.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
