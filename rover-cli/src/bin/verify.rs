use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Re-simulates a solution file against a problem file and checks it reaches the goal.
#[derive(Debug, Parser)]
#[command(name = "verify", rename_all = "kebab-case")]
struct Opt {
    /// Path to the problem file.
    problem_file: PathBuf,
    /// Path to the solution file to check.
    solution_file: PathBuf,

    /// Logging level: one of "error", "warn", "info", "debug", "trace".
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> ExitCode {
    let orig_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        std::process::exit(1);
    }));

    let opt = Opt::parse();
    rover_cli::init_logging(opt.log_level);

    match rover_cli::run_verify(&opt.problem_file, &opt.solution_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
