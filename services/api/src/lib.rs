mod cli;
mod infra;
mod report;
mod routes;
mod server;

use lagos_rent::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
