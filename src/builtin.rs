use crate::command::{Handler, NamespaceProvider, handler};
use crate::config::VERSION;
use crate::error::{CapyError, Result};
use crate::interpreter::Interpreter;
use crate::lexer::{split_first_word, words};
use crate::value::Value;
use chrono::Local;
use std::f64::consts::PI;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Namespaces whose commands are in the table before the first line runs.
pub(crate) const SEEDED: [&str; 4] = ["io", "math", "time", "base"];

/// Built-in namespace providers, all resident.
pub(crate) fn namespaces() -> Vec<Rc<dyn NamespaceProvider>> {
    let providers: [Rc<dyn NamespaceProvider>; 4] =
        [Rc::new(Io), Rc::new(Math), Rc::new(Time), Rc::new(Base)];
    providers.into()
}

/// Split `argument` into exactly `N` words or fail with the command's usage.
pub(crate) fn exactly<'a, const N: usize>(
    command: &'static str,
    usage: &'static str,
    argument: &'a str,
) -> Result<[&'a str; N]> {
    words(argument)
        .try_into()
        .map_err(|_| CapyError::ArgumentCount { command, usage })
}

/// Read a numeric operand: `token` itself if it is a number, otherwise the
/// value of the register named `token`.
pub(crate) fn number(interp: &Interpreter, command: &'static str, token: &str) -> Result<f64> {
    if let Ok(x) = token.parse::<f64>() {
        return Ok(x);
    }
    let parsed = match interp.registers().get(token) {
        Some(value) => value.as_number().ok_or_else(|| value.to_string()),
        None => Err(token.to_string()),
    };
    parsed.map_err(|found| CapyError::ArgumentKind {
        command,
        expected: "a number",
        found,
    })
}

/// Console input and output, and plain register assignment.
pub struct Io;

impl NamespaceProvider for Io {
    fn name(&self) -> &str {
        "io"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("write", handler(io_write)),
            ("clear", handler(io_clear)),
            ("read", handler(io_read)),
            ("local", handler(io_local)),
        ]
    }
}

/// `io.write text`
fn io_write(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let text = interp.registers().resolve(argument);
    writeln!(interp.output(), "{text}")?;
    Ok(())
}

/// `io.clear`
fn io_clear(interp: &mut Interpreter, _argument: &str) -> Result<()> {
    let out = interp.output();
    write!(out, "\x1bc")?;
    out.flush()?;
    Ok(())
}

/// `io.read name prompt`
fn io_read(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let (name, prompt) = split_first_word(argument);
    if name.is_empty() {
        return Err(CapyError::ArgumentCount {
            command: "io.read",
            usage: "name prompt",
        });
    }
    let prompt = interp.registers().resolve(prompt);
    let out = interp.output();
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if interp.input().read_line(&mut line)? == 0 {
        return Err(CapyError::EndOfInput("io.read"));
    }
    let answer = line.trim_end_matches(['\n', '\r']);
    interp.registers_mut().set(name, answer);
    Ok(())
}

/// `io.local name value`
fn io_local(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let (name, value) = split_first_word(argument);
    if name.is_empty() {
        return Err(CapyError::ArgumentCount {
            command: "io.local",
            usage: "name value",
        });
    }
    let value = Value::infer(&interp.registers().resolve(value));
    interp.registers_mut().set(name, value);
    Ok(())
}

/// Floating-point arithmetic. Results always land in a register as floats.
pub struct Math;

impl NamespaceProvider for Math {
    fn name(&self) -> &str {
        "math"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("add", handler(math_add)),
            ("sub", handler(math_sub)),
            ("mul", handler(math_mul)),
            ("div", handler(math_div)),
            ("pow", handler(math_pow)),
            ("mod", handler(math_mod)),
            ("sqrt", handler(math_sqrt)),
            ("pi", handler(math_pi)),
        ]
    }
}

fn binary(
    interp: &mut Interpreter,
    argument: &str,
    command: &'static str,
    op: impl Fn(f64, f64) -> Result<f64>,
) -> Result<()> {
    let argument = interp.registers().resolve(argument);
    let [a, b, dest] = exactly(command, "a b dest", &argument)?;
    let a = number(interp, command, a)?;
    let b = number(interp, command, b)?;
    let result = op(a, b)?;
    interp.registers_mut().set(dest, result);
    Ok(())
}

fn math_add(interp: &mut Interpreter, argument: &str) -> Result<()> {
    binary(interp, argument, "math.add", |a, b| Ok(a + b))
}

fn math_sub(interp: &mut Interpreter, argument: &str) -> Result<()> {
    binary(interp, argument, "math.sub", |a, b| Ok(a - b))
}

fn math_mul(interp: &mut Interpreter, argument: &str) -> Result<()> {
    binary(interp, argument, "math.mul", |a, b| Ok(a * b))
}

/// Dividing by zero gives `0.0` unless `strict_division` is configured.
fn math_div(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let strict = interp.config().strict_division;
    binary(interp, argument, "math.div", |a, b| {
        if b != 0.0 {
            Ok(a / b)
        } else if strict {
            Err(CapyError::DivisionByZero("math.div"))
        } else {
            log::warn!("math.div: {a} / 0 evaluated as 0.0");
            Ok(0.0)
        }
    })
}

fn math_pow(interp: &mut Interpreter, argument: &str) -> Result<()> {
    binary(interp, argument, "math.pow", |a, b| Ok(a.powf(b)))
}

/// Remainder with the sign of the divisor: `-7 mod 3` is `2`.
fn math_mod(interp: &mut Interpreter, argument: &str) -> Result<()> {
    binary(interp, argument, "math.mod", |a, b| {
        if b == 0.0 {
            return Err(CapyError::DivisionByZero("math.mod"));
        }
        let r = a % b;
        if r != 0.0 && (r < 0.0) != (b < 0.0) {
            Ok(r + b)
        } else {
            Ok(r)
        }
    })
}

fn math_sqrt(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let argument = interp.registers().resolve(argument);
    let [a, dest] = exactly("math.sqrt", "a dest", &argument)?;
    let a = number(interp, "math.sqrt", a)?;
    if a < 0.0 {
        return Err(CapyError::ArgumentKind {
            command: "math.sqrt",
            expected: "a non-negative number",
            found: Value::Float(a).to_string(),
        });
    }
    interp.registers_mut().set(dest, a.sqrt());
    Ok(())
}

fn math_pi(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("math.pi", "dest", argument)?;
    interp.registers_mut().set(dest, PI);
    Ok(())
}

/// Clock access and blocking waits.
pub struct Time;

impl NamespaceProvider for Time {
    fn name(&self) -> &str {
        "time"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("sleep", handler(time_sleep)),
            ("time", handler(time_time)),
            ("ctime", handler(time_ctime)),
            ("localtime", handler(time_localtime)),
        ]
    }
}

/// `time.sleep seconds` blocks the interpreter thread.
fn time_sleep(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let argument = interp.registers().resolve(argument);
    let [seconds] = exactly("time.sleep", "seconds", &argument)?;
    let seconds = number(interp, "time.sleep", seconds)?;
    let duration =
        Duration::try_from_secs_f64(seconds).map_err(|_| CapyError::ArgumentKind {
            command: "time.sleep",
            expected: "a non-negative number of seconds",
            found: Value::Float(seconds).to_string(),
        })?;
    thread::sleep(duration);
    Ok(())
}

fn time_time(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("time.time", "dest", argument)?;
    let now = Local::now().timestamp_micros() as f64 / 1_000_000.0;
    interp.registers_mut().set(dest, now);
    Ok(())
}

fn time_ctime(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("time.ctime", "dest", argument)?;
    let now = Local::now().format("%a %b %e %H:%M:%S %Y").to_string();
    interp.registers_mut().set(dest, now);
    Ok(())
}

fn time_localtime(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [dest] = exactly("time.localtime", "dest", argument)?;
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    interp.registers_mut().set(dest, now);
    Ok(())
}

/// Interpreter services: imports and introspection.
pub struct Base;

impl NamespaceProvider for Base {
    fn name(&self) -> &str {
        "base"
    }

    fn operations(&self) -> Vec<(&'static str, Handler)> {
        vec![
            ("import", handler(base_import)),
            ("commands", handler(base_commands)),
            ("registers", handler(base_registers)),
            ("version", handler(base_version)),
        ]
    }
}

/// `base.import namespace`
fn base_import(interp: &mut Interpreter, argument: &str) -> Result<()> {
    let [namespace] = exactly("base.import", "namespace", argument)?;
    interp.import(namespace)?;
    Ok(())
}

fn base_commands(interp: &mut Interpreter, _argument: &str) -> Result<()> {
    let names: Vec<String> = interp.commands().names().map(str::to_string).collect();
    let out = interp.output();
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn base_registers(interp: &mut Interpreter, _argument: &str) -> Result<()> {
    let dump: Vec<String> = interp
        .registers()
        .iter()
        .map(|(name, value)| format!("{name} = {value}"))
        .collect();
    let out = interp.output();
    for line in dump {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn base_version(interp: &mut Interpreter, _argument: &str) -> Result<()> {
    writeln!(interp.output(), "{VERSION}")?;
    Ok(())
}
