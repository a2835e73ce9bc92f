use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    quotecraft_cli::run().await
}
