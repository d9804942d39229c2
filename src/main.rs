use std::process::ExitCode;

use boardsweep::cli;
use boardsweep::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(status) => status.into(),
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
