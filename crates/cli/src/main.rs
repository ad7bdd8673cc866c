// xgrep - search spreadsheet workbooks for cell values

use std::io;
use std::process::ExitCode;

use clap::Parser;

use xlsxgrep_cli::app::{run, Cli, CliError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli, &mut io::stdout(), &mut io::stderr()) {
        Ok(code) => ExitCode::from(code),
        Err(CliError { code, message, hint }) => {
            eprintln!("error: {}", message);
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
