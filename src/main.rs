#![deny(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use cloudadm::{commands, shell::binder, shell::error::EXIT_FAILURE};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let registry = match commands::registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    ExitCode::from(binder::run(&registry, std::env::args_os()).await)
}
