use std::path::PathBuf;
use std::process;

use clap::Parser as ClapParser;

use glox::driver::Lox;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking interpreter for the Lox language", long_about = None)]
struct Cli {
    /// Script to execute; starts the interactive prompt when omitted
    script: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args: Cli = Cli::parse();

    match args.script.as_slice() {
        [] => {
            let mut lox: Lox = Lox::new();

            lox.run_prompt()?;
        }

        [script] => {
            let mut lox: Lox = Lox::new();

            lox.run_file(script)?;

            if lox.had_error() {
                process::exit(1);
            }
        }

        _ => {
            println!("usage: glox [script]");
            process::exit(1);
        }
    }

    Ok(())
}
