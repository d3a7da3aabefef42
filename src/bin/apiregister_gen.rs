use apiregister::cli::{run_cli, Cli};
use apiregister::logging::init_logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging() {
        eprintln!("warning: {err:#}");
    }
    if let Err(err) = run_cli(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
