use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// GET /docs
///
/// Usage summary with example bodies for every endpoint.
pub async fn docs_handler() -> impl Responder {
    let help = json!({
        "description": "Course section scheduling API. POST /api/schedule/auto assigns a classroom and a contiguous time-slot block to every pending section, or reports that no complete schedule exists; nothing is persisted on failure.",
        "endpoints": {
            "POST /api/schedule/auto": {
                "body_example": {"maxNodes": 1_000_000u64, "cohortBuildingPolicy": "prefer"},
                "note": "both fields optional; send {} for the defaults. cohortBuildingPolicy is 'prefer' or 'hard'."
            },
            "POST /api/schedule/modify": {
                "body_example": {"sectionId": 1, "classroomId": 2, "timeSlotIds": [3, 4]},
                "note": "manual override; existence checks only, no conflict detection."
            },
            "POST /api/classroom/add": {
                "body_example": {"campus": "north", "building": "B2", "roomNumber": 101, "capacity": 60, "roomType": "lecture"}
            },
            "POST /api/classroom/modify": {
                "body_example": {"classroomId": 1, "capacity": 80}
            },
            "POST /api/classroom/delete": {
                "body_example": {"classroomId": 1}
            },
            "GET /api/classroom/query": "/api/classroom/query?keyword=north",
            "POST /api/application/add": {
                "body_example": {"secId": 1, "reason": "room too small", "teacher": "Prof. Chen"}
            },
            "POST /api/application/process": {
                "body_example": {"secId": 1, "suggestion": "moved to B2-101", "finalDecision": true}
            },
            "GET /api/application/query": "/api/application/query?page=1&size=10",
            "GET /api/search/section": "/api/search/section?teacherId=7&year=2024&semester=Spring"
        },
        "responses": "success bodies are {\"message\", \"data\"}, errors are HTTP 400 with {\"error\"}"
    });

    HttpResponse::Ok().json(help)
}
