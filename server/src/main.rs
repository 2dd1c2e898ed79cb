mod apis;
mod argon2;
mod auth;
mod config;
mod constants;
mod entity;
mod error;
mod log;
mod router;
mod state;
mod table;

use crate::{constants::*, error::*, log::*, router::build_router, state::AppState};
use config::parse_opts;
use std::sync::Arc;
use tokio::runtime::Builder;

fn main() -> Result<()> {
  init_logger();

  let mut runtime_builder = Builder::new_multi_thread();
  runtime_builder.enable_all();
  runtime_builder.thread_name(THREAD_NAME);
  let runtime = runtime_builder.build()?;

  runtime.block_on(async {
    match parse_opts().await {
      Ok(Some(shared_state)) => serve(Arc::new(shared_state)).await,
      Ok(None) => Ok(()),
      Err(e) => {
        error!("{e}");
        Err(e)
      }
    }
  })
}

async fn serve(shared_state: Arc<AppState>) -> Result<()> {
  let addr = shared_state.listen_socket;
  let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;
  info!("Listening on {}", &addr);

  let router = build_router(shared_state);

  if let Err(e) = axum::serve(tcp_listener, router).await {
    error!("Server is down!: {e}");
    return Err(e.into());
  }
  Ok(())
}
