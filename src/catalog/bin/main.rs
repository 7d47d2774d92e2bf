include!("../../lib.rs");
use lambda_http::{run, Error};
use tracing::info;
use crate::catalog::controller::build_router;
use crate::core::controller::AppState;
use crate::core::domain::{Configuration, ServerRuntime};
use crate::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env()?;
    setup_tracing(&config);

    let state = AppState::new(&config);
    info!(branch = %config.branch_id, runtime = ?config.runtime,
        duplicate_policy = ?config.duplicate_policy, seeded = config.seed_catalog, "starting catalog");

    match config.runtime {
        ServerRuntime::Lambda => {
            run(build_router(state)).await
        }
        ServerRuntime::Local => {
            info!(addr = %config.listen_addr, "listening");
            axum::Server::bind(&config.listen_addr)
                .serve(build_router(state).into_make_service())
                .await?;
            Ok(())
        }
    }
}
