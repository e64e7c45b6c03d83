#![deny(warnings)]
#![deny(clippy::unwrap_used)]

use std::sync::Arc;

use dotenv::dotenv;
use poem::{
    EndpointExt, Route, Server, delete, get, listener::TcpListener, middleware::Tracing, post,
};
use tracing::info;

use shift_logger::shifts::{ShiftStore, config, persist::JsonFileStore, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize logging with proper tracing default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let port = config::resolve_port(None);
    let data_file = config::resolve_data_file(None);

    // Construct the store from the persisted snapshot
    let store = Arc::new(ShiftStore::new(Box::new(JsonFileStore::new(&data_file))));
    info!("Loaded {} shifts from {}", store.all().len(), data_file);

    let addr = format!("0.0.0.0:{port}");
    info!("Starting shift logger on {}", addr);

    let app = Route::new()
        .at(
            "/api/shifts",
            get(routes::list_shifts).post(routes::create_shift),
        )
        .at("/api/shifts/:id", delete(routes::delete_shift))
        .at("/api/dashboard", get(routes::dashboard))
        .at("/api/export/csv", get(routes::export_csv))
        .at("/api/export/xlsx", get(routes::export_xlsx))
        .at("/api/backup", get(routes::download_backup))
        .at("/api/restore", post(routes::restore_backup))
        .data(store)
        .with(Tracing);

    Server::new(TcpListener::bind(addr))
        .name("Shift Logger")
        .run(app)
        .await?;

    Ok(())
}
