use std::process::ExitCode;

fn main() -> ExitCode {
    pifloor_cli::run()
}
