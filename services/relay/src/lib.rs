mod cli;
mod filing;
mod infra;
mod preview;
mod routes;
mod server;

use taxplanner::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
