use dotenvy::dotenv;
use std::env;

use attendance::database::{self, admin_repo};
use attendance::services::admin_auth_service;

/// Seed (or reset) an administrator account:
/// `create_admin <username> <password>`.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let (Some(username), Some(password)) = (args.next(), args.next()) else {
        eprintln!("usage: create_admin <username> <password>");
        std::process::exit(2);
    };

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = database::create_pool(&db_url)
        .await
        .expect("cannot connect to database");
    database::init_schema(&pool)
        .await
        .expect("cannot initialize database schema");

    let hashed = admin_auth_service::hash_password(&password).expect("cannot hash password");
    match admin_repo::upsert_admin(&pool, &username, &hashed).await {
        Ok(_) => println!("admin '{}' is ready", username),
        Err(e) => {
            eprintln!("failed to store admin: {}", e);
            std::process::exit(1);
        }
    }
}
