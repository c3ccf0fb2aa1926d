use std::process::ExitCode;

fn main() -> ExitCode {
    match yolo_viewer::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
