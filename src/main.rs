use std::{env, fs::read_to_string, io, path::Path, process::exit, time::Instant};

use log::{error, info};
use tomlang::{check, display_error, execute, parse_source, TomError};

const USAGE: &str = "usage: tomlang <file.tl> [--check]";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (flags, files): (Vec<&String>, Vec<&String>) = args.iter().partition(|arg| arg.starts_with("--"));
    let check_only = flags.iter().any(|flag| *flag == "--check");

    if files.len() != 1 || flags.iter().any(|flag| *flag != "--check") {
        eprintln!("{}", USAGE);
        exit(1);
    }

    let file_path = files[0];
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("could not read {}: {}", file_path, err);
            exit(1);
        }
    };

    exit(run(&source, &file_name, check_only));
}

/// Runs every phase and maps the outcome to the process exit code.
fn run(source: &str, file_name: &str, check_only: bool) -> i32 {
    let start = Instant::now();

    let program = match parse_source(source, file_name) {
        Ok(program) => program,
        Err(TomError::Syntax(err)) => {
            display_error(&err, source);
            return 1;
        }
        Err(err) => {
            eprintln!("{}", err);
            return 1;
        }
    };
    info!("Parsed in {:?}", start.elapsed());

    let check_start = Instant::now();
    let diagnostics = check(&program);
    info!("Checked in {:?}", check_start.elapsed());

    if !diagnostics.is_empty() {
        eprintln!("Compilation errors:");
        for diagnostic in &diagnostics {
            eprintln!("{}", diagnostic);
        }
        return 1;
    }

    if check_only {
        return 0;
    }

    let run_start = Instant::now();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = execute(&program, stdin.lock(), stdout.lock());
    info!("Executed in {:?}", run_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    match result {
        Ok(()) => 0,
        Err(err) => {
            error!("{} failure", err.get_error_name());
            eprintln!("Runtime error: {}", err);
            2
        }
    }
}
