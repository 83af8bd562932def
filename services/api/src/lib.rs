mod cli;
mod infra;
mod report;
mod routes;
mod server;

use hackathon_admissions::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
