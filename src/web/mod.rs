mod handlers;
mod state;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

pub use state::AppState;

/// Register the JSON API on an app or scope.
pub(crate) fn routes(data: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(data)
            .app_data(
                web::JsonConfig::default()
                    .limit(64 * 1024)
                    .error_handler(handlers::json_error_handler),
            )
            .route("/api/options", web::get().to(handlers::options))
            .route("/api/sessions", web::post().to(handlers::create_session))
            .route("/api/sessions/{id}", web::get().to(handlers::get_session))
            .route(
                "/api/sessions/{id}/filters",
                web::put().to(handlers::set_filters),
            )
            .route("/api/sessions/{id}/reset", web::post().to(handlers::reset))
            .route(
                "/api/sessions/{id}/dashboard",
                web::get().to(handlers::dashboard),
            )
            .route("/api/sessions/{id}/records", web::get().to(handlers::records))
            .route("/api/sessions/{id}/export", web::get().to(handlers::export));
    }
}

/// Serve the dashboard API until the process is stopped.
pub async fn start_server(state: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let data = web::Data::new(state);

    tracing::info!(
        rows = data.dataset().len(),
        "starting salary dashboard server on http://{host}:{port}"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .configure(routes(data.clone()))
    })
    .bind((host, port))?
    .run()
    .await
}
