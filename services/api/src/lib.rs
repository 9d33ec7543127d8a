mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use consultancy::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
