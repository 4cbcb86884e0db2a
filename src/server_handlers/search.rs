use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::storage;

/// GET /api/search/section?teacherId=&classroomId=&year=&semester=
///
/// At least one of teacherId / classroomId must be given, and whichever is
/// given must be numeric; with both, only sections matching the two together
/// are returned. Year and semester are required and narrow the result to one
/// academic term.
pub async fn search_section_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();

    let teacher_id = match qm.get("teacherId").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": "teacherId must be a number"}))
            }
        },
    };
    let classroom_id = match qm.get("classroomId").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": "classroomId must be a number"}))
            }
        },
    };
    let year = match qm.get("year").and_then(|s| s.trim().parse::<i32>().ok()) {
        Some(y) => y,
        None => return HttpResponse::BadRequest().json(json!({"error": "year is required"})),
    };
    let semester = match qm.get("semester").map(|s| s.trim()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => return HttpResponse::BadRequest().json(json!({"error": "semester is required"})),
    };

    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::search_sections(&conn, teacher_id, classroom_id, year, &semester) {
        Ok(sections) => {
            HttpResponse::Ok().json(json!({"message": "search completed", "data": sections}))
        }
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
