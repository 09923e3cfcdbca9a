//! CapyScript: a line-oriented command interpreter.
//!
//! Every script line is one command invocation, `namespace.operation argument`,
//! looked up in a command table and executed immediately. Commands talk to the
//! console, write named registers, or grow the command table itself with
//! `base.import`. There is no control flow and no expression language; the
//! only transformation applied to text is `$name` / `${name}` interpolation.
//!
//! The main entry point is [`Interpreter`]. The public modules [`command`],
//! [`env`] and [`loader`] expose the pieces needed to add namespaces of your
//! own.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod extensions;
mod interpreter;
mod io_adapters;
pub mod lexer;
pub mod loader;
pub mod resolver;
pub mod value;

pub use command::{CommandTable, Handler, NamespaceProvider, handler};
pub use config::{Config, VERSION};
pub use env::Registers;
pub use error::{CapyError, Result, ScriptError};
pub use interpreter::{Interpreter, Outcome, SCRIPT_EXTENSION, State, load_script};
pub use io_adapters::{MemReader, MemWriter};
pub use value::Value;
