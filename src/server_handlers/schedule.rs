use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;
use std::sync::OnceLock;
use tokio::sync::Semaphore;

use crate::algorithm;
use crate::models::{ClassroomId, CohortBuildingPolicy, SectionId, TimeSlotId};
use crate::storage;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutoScheduleRequest {
    max_nodes: Option<u64>,
    cohort_building_policy: Option<CohortBuildingPolicy>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyScheduleRequest {
    section_id: Option<SectionId>,
    classroom_id: Option<ClassroomId>,
    time_slot_ids: Option<Vec<TimeSlotId>>,
}

/// POST /api/schedule/auto
///
/// Runs the full scheduling pipeline. The body may override the node budget
/// (`maxNodes`) and the cohort building policy (`cohortBuildingPolicy`,
/// "hard" or "prefer"); an empty JSON object runs with the env defaults.
pub async fn auto_schedule_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let req: AutoScheduleRequest = match serde_json::from_value(body.into_inner()) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": format!("invalid request body: {}", e)}))
        }
    };

    let mut config = algorithm::config_from_env();
    if let Some(n) = req.max_nodes {
        config.max_nodes = n;
    }
    if let Some(p) = req.cohort_building_policy {
        config.cohort_policy = p;
    }

    // The search is CPU-bound; cap concurrent runs at the core count so a
    // burst of requests cannot starve the async runtime.
    static GLOBAL_SEM: OnceLock<Arc<Semaphore>> = OnceLock::new();
    let sem = GLOBAL_SEM
        .get_or_init(|| {
            let procs = num_cpus::get();
            Arc::new(Semaphore::new(std::cmp::max(1, procs)))
        })
        .clone();

    let permit = match sem.acquire_owned().await {
        Ok(p) => p,
        Err(_) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": "failed to acquire semaphore"}))
        }
    };

    let blocking_handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let mut conn = storage::open_db().map_err(|e| e.to_string())?;
        algorithm::auto_schedule(&mut conn, &config).map_err(|e| e.to_string())
    });

    let blocking_result = match blocking_handle.await {
        Ok(res) => res,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("task join error: {}", e)}))
        }
    };

    let report = match blocking_result {
        Ok(r) => r,
        Err(msg) => return HttpResponse::BadRequest().json(json!({"error": msg})),
    };

    HttpResponse::Ok().json(json!({"message": report.message, "data": report}))
}

/// POST /api/schedule/modify
///
/// Manual override: `{sectionId, classroomId, timeSlotIds}`. Checks that the
/// referenced rows exist and writes the placement as given, without any
/// conflict or cohesion checks.
pub async fn modify_schedule_handler(body: web::Json<ModifyScheduleRequest>) -> impl Responder {
    let req = body.into_inner();
    let sec_id = match req.section_id {
        Some(id) => id,
        None => return HttpResponse::BadRequest().json(json!({"error": "sectionId is required"})),
    };
    let classroom_id = match req.classroom_id {
        Some(id) => id,
        None => {
            return HttpResponse::BadRequest().json(json!({"error": "classroomId is required"}))
        }
    };
    let slot_ids = match req.time_slot_ids {
        Some(ids) => ids,
        None => {
            return HttpResponse::BadRequest().json(json!({"error": "timeSlotIds is required"}))
        }
    };

    let conn = match storage::open_db() {
        Ok(c) => c,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(json!({"error": format!("db open failed: {}", e)}))
        }
    };

    match algorithm::modify_schedule(&conn, sec_id, classroom_id, &slot_ids) {
        Ok(()) => HttpResponse::Ok().json(json!({"message": "schedule updated"})),
        Err(e) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    }
}
