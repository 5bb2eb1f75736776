use clap::Parser;
use crossgrid::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
