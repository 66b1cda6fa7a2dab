//! oauthkit CLI entry point

#![warn(clippy::all)]

use clap::Parser;

fn main() {
    let cli = oauthkit_cli::cli::Cli::parse();

    match cli.execute() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let exit_code = oauthkit_cli::cli::error::display_error(&e);
            std::process::exit(exit_code);
        }
    }
}
