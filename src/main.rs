use anyhow::Context;
use argh::{EarlyExit, FromArgs};
use capyscript::{Config, Interpreter, VERSION};
use std::path::PathBuf;

const PROGRAM: &str = "capyscript";

#[derive(FromArgs)]
/// Run CapyScript programs.
struct Cli {
    #[argh(switch)]
    /// print the interpreter version.
    ver: bool,

    #[argh(option)]
    /// run a .capy script file.
    run: Option<PathBuf>,

    #[argh(option)]
    /// run ';'-separated instructions given on the command line.
    drun: Option<String>,

    #[argh(switch)]
    /// start an interactive session.
    repl: bool,
}

fn usage() -> String {
    match Cli::from_args(&[PROGRAM], &["--help"]) {
        Err(EarlyExit { output, .. }) => output,
        Ok(_) => String::new(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("CAPYSCRIPT_LOG", "warn"))
        .init();

    let cli: Cli = argh::from_env();
    if cli.ver {
        println!("CapyScript {VERSION}");
        return Ok(());
    }

    let config = Config::from_env();
    if let Some(path) = cli.run {
        let mut capy = Interpreter::new(config)?;
        capy.run_file(&path)?;
    } else if let Some(code) = cli.drun {
        let mut capy = Interpreter::new(config)?;
        capy.run_inline(&code).context("inline program failed")?;
    } else if cli.repl {
        let mut capy = Interpreter::new(config)?;
        capy.repl()
            .map_err(|e| anyhow::anyhow!("interactive session failed: {e}"))?;
    } else {
        print!("{}", usage());
    }
    Ok(())
}
