use std::env;

use env_logger::{Env, Target};

mod cli;
mod exits;
mod terminal;
mod tui;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();

    exits::reset_terminal();
    exits::install_handlers();
    exits::harden();

    let args: Vec<String> = env::args().collect();

    let code = match args.len() {
        1 => tui::run(),
        _ => cli::run(&args),
    };
    std::process::exit(code);
}
