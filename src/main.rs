use std::net::SocketAddr;

use bulletin::{make_router, run_app};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bulletin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3001".into())
        .parse()
        .expect("PORT must be a number");
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let router = make_router();
    tracing::info!("Server started on {}", addr);
    if let Err(error) = run_app(router, addr).await {
        tracing::error!("Server error: {}", error);
    }
}
