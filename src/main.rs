use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match island_backend::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("island-backend failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
