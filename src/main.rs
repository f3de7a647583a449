use std::process::ExitCode;

mod cli;
mod config;
mod logging;
mod runner;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app).await
}
