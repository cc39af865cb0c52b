pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer, Scope};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{BookService, OrderService, UserService};
use domain::ports::Bookstore;

pub use db::{create_pool, DbPool};
pub use infrastructure::{DieselBookstore, MemoryBookstore};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// The services the handlers work against, generic over the backing
/// store so tests can swap in [`MemoryBookstore`].
pub struct AppState<S: Bookstore> {
    pub books: BookService<S>,
    pub users: UserService<S>,
    pub orders: OrderService<S>,
}

impl<S: Bookstore + Clone> AppState<S> {
    pub fn new(store: S) -> Self {
        AppState {
            books: BookService::new(store.clone()),
            users: UserService::new(store.clone()),
            orders: OrderService::new(store),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::books::add_book,
        handlers::books::get_book,
        handlers::books::get_all_books,
        handlers::books::delete_book,
        handlers::users::add_user,
        handlers::users::get_user,
        handlers::users::get_all_users,
        handlers::users::get_user_orders,
        handlers::users::delete_user,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::get_all_orders,
        handlers::orders::get_orders_by_user,
        handlers::orders::pay_order,
        handlers::orders::delete_order,
    ),
    components(schemas(
        handlers::books::BookRequest,
        handlers::books::BookResponse,
        handlers::users::UserRequest,
        handlers::users::UserResponse,
        handlers::orders::OrderItemRequest,
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderItemResponse,
        handlers::orders::OrderResponse,
    )),
    tags(
        (name = "books", description = "Catalog management"),
        (name = "users", description = "User registry"),
        (name = "orders", description = "Ordering and payment"),
    )
)]
struct ApiDoc;

/// All API routes under `/api`, generic over the backing store. Shared
/// between [`build_server`] and the HTTP tests.
pub fn api_scope<S: Bookstore>() -> Scope {
    web::scope("/api")
        .service(
            web::scope("/books")
                .route("", web::post().to(handlers::books::add_book::<S>))
                .route("", web::get().to(handlers::books::get_all_books::<S>))
                .route("/{id}", web::get().to(handlers::books::get_book::<S>))
                .route("/{id}", web::delete().to(handlers::books::delete_book::<S>)),
        )
        .service(
            web::scope("/users")
                .route("", web::post().to(handlers::users::add_user::<S>))
                .route("", web::get().to(handlers::users::get_all_users::<S>))
                .route("/{id}", web::get().to(handlers::users::get_user::<S>))
                .route("/{id}", web::delete().to(handlers::users::delete_user::<S>))
                .route(
                    "/{id}/orders",
                    web::get().to(handlers::users::get_user_orders::<S>),
                ),
        )
        .service(
            web::scope("/orders")
                .route("", web::post().to(handlers::orders::create_order::<S>))
                .route("", web::get().to(handlers::orders::get_all_orders::<S>))
                // registered before "/{id}" so "filter" is never taken for an id
                .route(
                    "/filter",
                    web::get().to(handlers::orders::get_orders_by_user::<S>),
                )
                .route("/{id}", web::get().to(handlers::orders::get_order::<S>))
                .route("/{id}/pay", web::post().to(handlers::orders::pay_order::<S>))
                .route("/{id}", web::delete().to(handlers::orders::delete_order::<S>)),
        )
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server. Swagger UI is served at `/swagger-ui/`.
pub fn build_server<S: Bookstore + Clone>(
    store: S,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(store));
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(api_scope::<S>())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
