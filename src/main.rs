use bookstore_service::{
    build_server, create_pool, run_migrations, DieselBookstore, MemoryBookstore,
};
use dotenvy::dotenv;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = create_pool(&database_url);
            run_migrations(&pool);
            log::info!("Starting server at http://{}:{} (postgres store)", host, port);
            build_server(DieselBookstore::new(pool), &host, port)?.await
        }
        Err(_) => {
            log::warn!("DATABASE_URL is not set, using the in-memory store; data is lost on shutdown");
            log::info!("Starting server at http://{}:{} (in-memory store)", host, port);
            build_server(MemoryBookstore::new(), &host, port)?.await
        }
    }
}
