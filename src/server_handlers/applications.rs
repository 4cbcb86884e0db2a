use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::SectionId;
use crate::storage;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddApplicationRequest {
    sec_id: Option<SectionId>,
    reason: Option<String>,
    teacher: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessApplicationRequest {
    sec_id: Option<SectionId>,
    suggestion: Option<String>,
    final_decision: Option<bool>,
}

/// POST /api/application/add
pub async fn application_add_handler(body: web::Json<AddApplicationRequest>) -> impl Responder {
    let req = body.into_inner();
    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::add_application(&conn, req.sec_id, req.reason.as_deref(), req.teacher.as_deref())
    {
        Ok(app) => {
            HttpResponse::Ok().json(json!({"message": "application submitted", "data": app}))
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// GET /api/application/query?page=&size=
///
/// 1-based paging, defaults page=1 size=10.
pub async fn application_query_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    let page = qm
        .get("page")
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let size = qm
        .get("size")
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(10);

    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::query_applications(&conn, page, size) {
        Ok((total, items)) => HttpResponse::Ok().json(json!({
            "message": "applications found",
            "data": {"total": total, "items": items}
        })),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// POST /api/application/process
pub async fn application_process_handler(
    body: web::Json<ProcessApplicationRequest>,
) -> impl Responder {
    let req = body.into_inner();
    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::process_application(
        &conn,
        req.sec_id,
        req.suggestion.as_deref(),
        req.final_decision,
    ) {
        Ok(app) => {
            HttpResponse::Ok().json(json!({"message": "application processed", "data": app}))
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
