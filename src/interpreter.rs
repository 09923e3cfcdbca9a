use crate::builtin;
use crate::command::{CommandTable, Handler, NamespaceProvider};
use crate::config::{Config, VERSION};
use crate::env::Registers;
use crate::error::{CapyError, Result, ScriptError};
use crate::extensions;
use crate::lexer::{self, Line};
use crate::loader::{ExtensionLoader, ModuleFactory};
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::rc::Rc;

/// Required extension of script files.
pub const SCRIPT_EXTENSION: &str = "capy";

/// Where the interpreter loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing has run yet.
    Ready,
    /// Executing; `line` is the 1-based line being dispatched (0 before the first).
    Running { line: usize },
    /// The last run ended.
    Halted(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed { line: usize },
}

/// The CapyScript virtual machine: register store, command table and the
/// loader that grows the table, plus the console the commands talk to.
///
/// Scripts run strictly top to bottom, one line at a time; the first failing
/// line halts the run. Registers and commands outlive a run, so a halted
/// interpreter can run another script against the same state.
///
/// Example
/// ```
/// use capyscript::{Config, Interpreter, MemReader, MemWriter};
/// let (out, handle) = MemWriter::with_handle();
/// let mut capy = Interpreter::with_io(
///     Config::default(),
///     Box::new(MemReader::new("")),
///     Box::new(out),
/// ).unwrap();
/// capy.run_script("math.add 2 3 z\nio.write $z").unwrap();
/// assert_eq!(handle.borrow().as_slice(), b"5.0\n");
/// ```
///
/// All state is reached through `&mut self`. Anything that dispatches
/// commands from outside the loop (an event callback, say) must go through
/// [`Interpreter::dispatch`] on the same thread, one command at a time.
pub struct Interpreter {
    config: Config,
    registers: Registers,
    commands: CommandTable,
    loader: ExtensionLoader,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
    state: State,
}

impl Interpreter {
    /// Create an interpreter attached to the process console.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_io(
            config,
            Box::new(BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    /// Create an interpreter with a custom console.
    ///
    /// Fails with [`CapyError::UnsupportedVersion`] if the configuration asks
    /// for a language version other than [`VERSION`].
    pub fn with_io(
        config: Config,
        input: Box<dyn BufRead>,
        output: Box<dyn Write>,
    ) -> Result<Self> {
        config.validate()?;

        let mut loader = ExtensionLoader::new();
        for provider in builtin::namespaces() {
            loader.add_namespace(provider);
        }
        extensions::install(&mut loader);

        let mut interp = Self {
            config,
            registers: Registers::new(),
            commands: CommandTable::new(),
            loader,
            input,
            output,
            state: State::Ready,
        };
        for namespace in builtin::SEEDED {
            interp.import(namespace)?;
        }
        Ok(interp)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Console output used by commands.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }

    /// Console input used by commands.
    pub fn input(&mut self) -> &mut dyn BufRead {
        &mut *self.input
    }

    /// Add or replace a single command.
    pub fn register_command(&mut self, name: &str, handler: Handler) {
        if self.commands.register(name, handler) {
            log::debug!("command {name} replaced");
        }
    }

    /// Make a namespace importable with `base.import <name>`.
    ///
    /// Its commands are not added to the table until it is imported.
    pub fn register_provider(&mut self, provider: impl NamespaceProvider + 'static) {
        self.loader.add_namespace(Rc::new(provider));
    }

    /// Make a module importable with `base.import <name>`.
    pub fn register_module(&mut self, name: &str, factory: ModuleFactory) {
        self.loader.add_module(name, factory);
    }

    /// Merge a namespace (or every namespace of a module) into the command
    /// table. Returns the number of commands added or replaced.
    pub fn import(&mut self, namespace: &str) -> Result<usize> {
        let entries = self.loader.resolve(namespace)?;
        let count = entries.len();
        for (name, handler) in entries {
            self.register_command(&name, handler);
        }
        log::info!("imported {namespace}: {count} commands");
        Ok(count)
    }

    /// Look up `name` and call it with the raw `argument`.
    pub fn dispatch(&mut self, name: &str, argument: &str) -> Result<()> {
        let handler = self
            .commands
            .get(name)
            .ok_or_else(|| CapyError::UnknownCommand(name.to_string()))?;
        log::debug!("dispatch {name} {argument:?}");
        (*handler)(self, argument)
    }

    /// Interpret a single line outside of a run: blanks and comments are
    /// ignored, anything else is dispatched.
    pub fn execute_line(&mut self, text: &str) -> Result<()> {
        match lexer::classify(text) {
            Line::Blank | Line::Comment => Ok(()),
            Line::Instruction { command, argument } => self.dispatch(command, argument),
        }
    }

    /// Run a script: every line in order, stopping at the first failure.
    pub fn run_script(&mut self, source: &str) -> std::result::Result<(), ScriptError> {
        self.start();
        for (index, text) in source.lines().enumerate() {
            let line = index + 1;
            match lexer::classify(text) {
                Line::Blank | Line::Comment => log::debug!("line {line}: skipped"),
                Line::Instruction { command, argument } => {
                    self.step(line, command, argument)?
                }
            }
        }
        self.finish();
        Ok(())
    }

    /// Run `;`-separated instructions. Segments are trimmed but otherwise not
    /// inspected: there are no comments and an empty segment is an unknown
    /// command.
    pub fn run_inline(&mut self, code: &str) -> std::result::Result<(), ScriptError> {
        self.start();
        for (index, text) in lexer::split_inline(code).enumerate() {
            let (command, argument) = lexer::split_instruction(text);
            self.step(index + 1, command, argument)?;
        }
        self.finish();
        Ok(())
    }

    /// Load a `.capy` file and run it.
    pub fn run_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let source = load_script(path)
            .with_context(|| format!("can't load script {}", path.display()))?;
        self.run_script(&source)
            .with_context(|| format!("{} failed", path.display()))?;
        Ok(())
    }

    /// Interactive session. Failing lines are reported and the session goes on.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        writeln!(self.output, "CapyScript {VERSION}. Ctrl-D to exit.")?;

        loop {
            match rl.readline("capy> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    if let Err(err) = self.execute_line(&line) {
                        writeln!(self.output, "error: {err}")?;
                    }
                    self.output.flush()?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn start(&mut self) {
        log::info!("run started");
        self.state = State::Running { line: 0 };
    }

    fn step(
        &mut self,
        line: usize,
        command: &str,
        argument: &str,
    ) -> std::result::Result<(), ScriptError> {
        self.state = State::Running { line };
        self.dispatch(command, argument).map_err(|source| {
            self.state = State::Halted(Outcome::Failed { line });
            ScriptError { line, source }
        })
    }

    fn finish(&mut self) {
        if let Err(e) = self.output.flush() {
            log::warn!("can't flush output: {e}");
        }
        log::info!("run finished");
        self.state = State::Halted(Outcome::Success);
    }
}

/// Read a script file, rejecting anything without the `.capy` extension.
pub fn load_script(path: &Path) -> Result<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
        return Err(CapyError::InvalidFileType(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}
