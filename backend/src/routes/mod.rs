//! Route definitions for the CHRONOS API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Stateless previews of derived values
        .nest("/calculations", calculation_routes())
        .nest("/profit/ordenes-compra", purchase_order_routes())
        .nest("/ventas", sale_routes())
        .nest("/clientes", client_routes())
        .nest("/distribuidores", distributor_routes())
        .nest("/bancos", bank_routes())
}

/// Calculator routes; they need no state, so they mount under any router
pub fn calculation_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/product", post(handlers::calculate_product))
        .route("/purchase-order", post(handlers::calculate_purchase_order))
        .route("/sale", post(handlers::calculate_sale))
}

fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchase_orders).post(handlers::create_purchase_order),
        )
        .route(
            "/:id",
            get(handlers::get_purchase_order)
                .put(handlers::update_purchase_order)
                .delete(handlers::delete_purchase_order),
        )
        .route("/:id/abonos", post(handlers::record_purchase_order_deposit))
}

fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sale))
        .route("/:id", get(handlers::get_sale))
        .route("/:id/abonos", post(handlers::record_sale_deposit))
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_clients).post(handlers::create_client))
        .route("/:id", get(handlers::get_client))
}

fn distributor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_distributors).post(handlers::create_distributor),
        )
        .route("/:id", get(handlers::get_distributor))
}

fn bank_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_banks))
        .route("/:id", get(handlers::get_bank))
}
