//! Variable interpolation: `$name` and `${name}` against the register store.

use crate::env::Registers;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `${...}` is tried before `$word` so both forms are found in one scan.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}|\$(\w+)").expect("reference pattern is valid")
});

/// Replace every register reference in `template` with the register's value.
///
/// Bare references (`$name`) take the longest run of word characters; braced
/// references (`${name}`) take everything up to the next `}`. A reference to a
/// register that was never written becomes `<undefined:name>`. Inserted values
/// are not scanned again, so a register holding `$other` yields the literal
/// text `$other`.
pub fn resolve(template: &str, registers: &Registers) -> String {
    if !template.contains('$') {
        return template.to_string();
    }
    REFERENCE
        .replace_all(template, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            match registers.get(name) {
                Some(value) => value.to_string(),
                None => format!("<undefined:{name}>"),
            }
        })
        .into_owned()
}
