use dotenvy::dotenv;
use std::net::SocketAddr;

use attendance::config::Settings;
use attendance::database;
use attendance::web::{self, AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env();

    let pool = database::create_pool(&settings.database_url)
        .await
        .expect("cannot connect to database");
    database::init_schema(&pool)
        .await
        .expect("cannot initialize database schema");

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .expect("cannot parse host/port");

    let app = web::router(AppState {
        pool,
        settings: settings.clone(),
    });

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                settings.host,
                settings.port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", settings.host, settings.port + 1)
                .parse()
                .expect("cannot parse fallback address");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Attendance server listening on http://{}", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
