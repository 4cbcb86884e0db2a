use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::server_handlers::{
    application_add_handler, application_process_handler, application_query_handler,
    auto_schedule_handler, classroom_add_handler, classroom_delete_handler,
    classroom_modify_handler, classroom_query_handler, docs_handler, modify_schedule_handler,
    search_section_handler,
};

/// Start the HTTP server on `bind_addr` (e.g. "127.0.0.1:8080").
pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .route("/api/schedule/auto", web::post().to(auto_schedule_handler))
            .route("/api/schedule/modify", web::post().to(modify_schedule_handler))
            .route("/api/classroom/add", web::post().to(classroom_add_handler))
            .route("/api/classroom/modify", web::post().to(classroom_modify_handler))
            .route("/api/classroom/query", web::get().to(classroom_query_handler))
            .route("/api/classroom/delete", web::post().to(classroom_delete_handler))
            .route("/api/application/add", web::post().to(application_add_handler))
            .route("/api/application/query", web::get().to(application_query_handler))
            .route("/api/application/process", web::post().to(application_process_handler))
            .route("/api/search/section", web::get().to(search_section_handler))
            .route("/docs", web::get().to(docs_handler))
    })
    .bind(bind_addr)?
    .run()
    .await
}
