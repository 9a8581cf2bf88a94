use clap::{ArgGroup, Parser};

mod commands;
mod output;
mod tty;

use commands::GlobalArgs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "standup")]
#[command(version = VERSION)]
#[command(about = "Stand up or tear down a local Drupal dev stack with Lando")]
#[command(group(ArgGroup::new("pipeline").required(true).multiple(false)))]
struct Cli {
    /// Spin up a new Lando app and install Drupal
    #[arg(long, group = "pipeline")]
    install: bool,

    /// Reset the Git repo and destroy the Lando app
    #[arg(long, group = "pipeline")]
    wipe: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = match GlobalArgs::from_cwd() {
        Ok(global) => global,
        Err(err) => return exit_with_error(err),
    };

    if cli.install {
        match commands::install::run(&global) {
            Ok(data) => {
                output::print_result(&Ok(data));
                std::process::ExitCode::SUCCESS
            }
            Err(err) => exit_with_error(err),
        }
    } else {
        debug_assert!(cli.wipe);
        match commands::wipe::run(&global) {
            Ok(data) => {
                output::print_result(&Ok(data));
                std::process::ExitCode::SUCCESS
            }
            Err(err) => exit_with_error(err),
        }
    }
}

fn exit_with_error(err: standup::Error) -> std::process::ExitCode {
    let exit_code = output::exit_code_for_error(err.code);
    output::print_result::<serde_json::Value>(&Err(err));
    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
