use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::ClassroomId;
use crate::storage;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddClassroomRequest {
    campus: Option<String>,
    capacity: Option<i32>,
    building: Option<String>,
    room_number: Option<i32>,
    room_type: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyClassroomRequest {
    classroom_id: Option<ClassroomId>,
    campus: Option<String>,
    capacity: Option<i32>,
    building: Option<String>,
    room_type: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClassroomRequest {
    classroom_id: Option<ClassroomId>,
}

/// POST /api/classroom/add
pub async fn classroom_add_handler(body: web::Json<AddClassroomRequest>) -> impl Responder {
    let req = body.into_inner();
    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::add_classroom(
        &conn,
        req.campus.as_deref(),
        req.capacity,
        req.building.as_deref(),
        req.room_number,
        req.room_type.as_deref(),
    ) {
        Ok(room) => HttpResponse::Ok().json(json!({"message": "classroom added", "data": room})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// POST /api/classroom/modify
///
/// Applies only the provided fields; blank campus and non-positive capacity
/// are ignored rather than rejected.
pub async fn classroom_modify_handler(body: web::Json<ModifyClassroomRequest>) -> impl Responder {
    let req = body.into_inner();
    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::modify_classroom(
        &conn,
        req.classroom_id,
        req.campus.as_deref(),
        req.capacity,
        req.building.as_deref(),
        req.room_type.as_deref(),
    ) {
        Ok(room) => HttpResponse::Ok().json(json!({"message": "classroom updated", "data": room})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// GET /api/classroom/query?keyword=
///
/// Keyword matches campus, building and room type as substrings, and the
/// classroom id / room number when it parses as a number.
pub async fn classroom_query_handler(
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let qm = query.into_inner();
    let keyword = match qm.get("keyword").map(|s| s.trim()) {
        Some(k) if !k.is_empty() => k.to_string(),
        _ => {
            return HttpResponse::BadRequest().json(json!({"error": "keyword must not be empty"}))
        }
    };

    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::query_classrooms(&conn, &keyword) {
        Ok(rooms) if rooms.is_empty() => {
            HttpResponse::Ok().json(json!({"message": "no matching classrooms", "data": rooms}))
        }
        Ok(rooms) => HttpResponse::Ok().json(json!({"message": "classrooms found", "data": rooms})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}

/// POST /api/classroom/delete
///
/// Refuses to delete a room any section still references.
pub async fn classroom_delete_handler(body: web::Json<DeleteClassroomRequest>) -> impl Responder {
    let req = body.into_inner();
    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match storage::delete_classroom(&conn, req.classroom_id) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "classroom deleted"})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
