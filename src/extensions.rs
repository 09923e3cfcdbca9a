//! Namespaces that ship with the interpreter but are only added to the
//! command table by `base.import`.
//!
//! `random` and `string` are resident and imported by name. `os` and
//! `platform` live in the `system` module, so `base.import system` brings in
//! both; afterwards each can also be imported on its own.

use crate::builtin::{exactly, number};
use crate::command::{Handler, NamespaceProvider, handler};
use crate::error::{CapyError, Result};
use crate::interpreter::Interpreter;
use crate::lexer::{split_first_word, words};
use crate::loader::ExtensionLoader;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::env as stdenv;
use std::rc::Rc;

/// Register the bundled namespaces and modules with `loader`.
pub(crate) fn install(loader: &mut ExtensionLoader) {
    loader.add_namespace(Rc::new(Random));
    loader.add_namespace(Rc::new(Strings));
    loader.add_module("system", system);
}

fn system() -> Vec<Box<dyn NamespaceProvider>> {
    let providers: [Box<dyn NamespaceProvider>; 2] = [Box::new(Os), Box::new(Platform)];
    providers.into()
}

/// Split `dest rest...`, failing with `usage` when `dest` is missing.
fn dest_and_rest<'a>(
    command: &'static str,
    usage: &'static str,
    argument: &'a str,
) -> Result<(&'a str, &'a str)> {
    let (dest, rest) = split_first_word(argument);
    if dest.is_empty() {
        return Err(CapyError::ArgumentCount { command, usage });
    }
    Ok((dest, rest))
}

fn integer(interp: &Interpreter, command: &'static str, token: &str) -> Result<i64> {
    let x = number(interp, command, token)?;
    if x.fract() != 0.0 || !(i64::MIN as f64..i64::MAX as f64).contains(&x) {
        return Err(CapyError::ArgumentKind {
            command,
            expected: "an integer",
            found: token.to_string(),
        });
    }
    Ok(x as i64)
}

pub struct Random;

impl NamespaceProvider for Random {
    fn name(&self) -> &str {
        "random"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("int", handler(random_int)),
            ("float", handler(random_float)),
            ("choice", handler(random_choice)),
        ]
    }
}

/// `random.int lo hi dest`, both bounds inclusive.
fn random_int(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let argument = interp.registers().resolve(argument);
    let [lo, hi, dest] = exactly("random.int", "lo hi dest", &argument)?;
    let lo = integer(interp, "random.int", lo)?;
    let hi = integer(interp, "random.int", hi)?;
    if lo > hi {
        return Err(CapyError::ArgumentKind {
            command: "random.int",
            expected: "lo <= hi",
            found: format!("{lo} {hi}"),
        });
    }
    let n = rand::rng().random_range(lo..=hi);
    interp.registers_mut().set(dest, n);
    Ok(())
}

/// `random.float dest`, in `[0, 1)`.
fn random_float(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("random.float", "dest", argument)?;
    let x: f64 = rand::rng().random();
    interp.registers_mut().set(dest, x);
    Ok(())
}

/// `random.choice dest item...`
fn random_choice(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let argument = interp.registers().resolve(argument);
    let (dest, rest) = dest_and_rest("random.choice", "dest item...", &argument)?;
    let items = words(rest);
    let picked = items
        .choose(&mut rand::rng())
        .ok_or(CapyError::ArgumentCount {
            command: "random.choice",
            usage: "dest item...",
        })?;
    interp.registers_mut().set(dest, *picked);
    Ok(())
}

/// Text helpers. The text operand is the verbatim rest of the line.
pub struct Strings;

impl NamespaceProvider for Strings {
    fn name(&self) -> &str {
        "string"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("upper", handler(string_upper)),
            ("lower", handler(string_lower)),
            ("length", handler(string_length)),
            ("replace", handler(string_replace)),
        ]
    }
}

fn string_upper(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let (dest, text) = dest_and_rest("string.upper", "dest text", argument)?;
    let text = interp.registers().resolve(text).to_uppercase();
    interp.registers_mut().set(dest, text);
    Ok(())
}

fn string_lower(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let (dest, text) = dest_and_rest("string.lower", "dest text", argument)?;
    let text = interp.registers().resolve(text).to_lowercase();
    interp.registers_mut().set(dest, text);
    Ok(())
}

fn string_length(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let (dest, text) = dest_and_rest("string.length", "dest text", argument)?;
    let len = interp.registers().resolve(text).chars().count();
    interp.registers_mut().set(dest, len as i64);
    Ok(())
}

/// `string.replace dest from to text`
fn string_replace(interp: &mut Interpreter, argument: &str) -> Result<()> {
    const USAGE: &str = "dest from to text";
    let (dest, rest) = dest_and_rest("string.replace", USAGE, argument)?;
    let (from, rest) = split_first_word(rest);
    let (to, text) = split_first_word(rest);
    if from.is_empty() || to.is_empty() {
        return Err(CapyError::ArgumentCount {
            command: "string.replace",
            usage: USAGE,
        });
    }
    let regs = interp.registers();
    let replaced = regs
        .resolve(text)
        .replace(&regs.resolve(from), &regs.resolve(to));
    interp.registers_mut().set(dest, replaced);
    Ok(())
}

pub struct Os;

impl NamespaceProvider for Os {
    fn name(&self) -> &str {
        "os"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![("cwd", handler(os_cwd)), ("env", handler(os_env))]
    }
}

fn os_cwd(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("os.cwd", "dest", argument)?;
    let cwd = stdenv::current_dir()?;
    interp
        .registers_mut()
        .set(dest, cwd.to_string_lossy().into_owned());
    Ok(())
}

/// `os.env dest NAME`; an unset variable reads as the empty string.
fn os_env(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest, key] = exactly("os.env", "dest NAME", argument)?;
    let value = stdenv::var(key).unwrap_or_default();
    interp.registers_mut().set(dest, value);
    Ok(())
}

pub struct Platform;

impl NamespaceProvider for Platform {
    fn name(&self) -> &str {
        "platform"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("system", handler(platform_system)),
            ("arch", handler(platform_arch)),
        ]
    }
}

fn platform_system(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("platform.system", "dest", argument)?;
    interp.registers_mut().set(dest, stdenv::consts::OS);
    Ok(())
}

fn platform_arch(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("platform.arch", "dest", argument)?;
    interp.registers_mut().set(dest, stdenv::consts::ARCH);
    Ok(())
}
