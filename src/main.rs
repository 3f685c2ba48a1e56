use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sabacan::{auth, config, handlers, paths, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sabacan=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let auth_db_path = paths::auth_db_path();
  let auth_db = auth::db::init_auth_db(Path::new(&auth_db_path))
    .expect("Failed to initialize auth database");

  std::fs::create_dir_all(paths::users_dir()).expect("Failed to create users directory");

  let state = AppState::new(
    auth_db,
    paths::users_dir().into(),
    config::load_content_dir(),
  );
  let app = handlers::build_router(state);

  let bind_addr = config::server_bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
