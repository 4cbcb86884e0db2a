/// HTTP surface tests: the full route table wired as in the server, driven
/// through actix's test service against a throwaway database file.
use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use slotfit::server_handlers::{
    application_add_handler, application_process_handler, application_query_handler,
    auto_schedule_handler, classroom_add_handler, classroom_delete_handler,
    classroom_modify_handler, classroom_query_handler, docs_handler, modify_schedule_handler,
    search_section_handler,
};
use slotfit::storage;

#[actix_web::test]
async fn route_table_answers_every_endpoint() {
    eprintln!("\n🔬 TEST: route table end to end");

    // the handlers open the db by env-configured path
    let db_path = std::env::temp_dir().join(format!("slotfit_api_{}.db", std::process::id()));
    let _ = std::fs::remove_file(&db_path);
    unsafe { std::env::set_var("SCHEDULER_DB_PATH", &db_path) };
    let conn = storage::open_db().expect("throwaway db");
    storage::init_db(&conn).expect("schema");
    drop(conn);

    let app = test::init_service(
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
            .route("/docs", web::get().to(docs_handler)),
    )
    .await;

    // classroom add succeeds and the query finds the new room
    let req = test::TestRequest::post()
        .uri("/api/classroom/add")
        .set_json(json!({"campus": "north", "capacity": 40, "building": "B2", "roomNumber": 101}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "classroom added");
    let classroom_id = body["data"]["classroomId"].as_i64().expect("new room id");

    let req = test::TestRequest::get()
        .uri("/api/classroom/query?keyword=north")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "classrooms found");

    // modify and delete surface the storage errors for unknown rooms
    let req = test::TestRequest::post()
        .uri("/api/classroom/modify")
        .set_json(json!({"classroomId": classroom_id + 99, "capacity": 60}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "classroom not found");

    let req = test::TestRequest::post()
        .uri("/api/classroom/delete")
        .set_json(json!({"classroomId": classroom_id + 99}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "classroom not found");

    // applications check the referenced section before anything else
    let req = test::TestRequest::post()
        .uri("/api/application/add")
        .set_json(json!({"secId": 1, "reason": "projector broken", "teacher": "Prof. Chen"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "section not found");

    let req = test::TestRequest::get()
        .uri("/api/application/query?page=1&size=10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "applications found");
    assert_eq!(body["data"]["total"], 0);

    let req = test::TestRequest::post()
        .uri("/api/application/process")
        .set_json(json!({"secId": 1, "suggestion": "moved to B2-101", "finalDecision": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "application not found");

    // manual override insists on all three ids
    let req = test::TestRequest::post()
        .uri("/api/schedule/modify")
        .set_json(json!({"classroomId": 1, "timeSlotIds": [1]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "sectionId is required");

    // a typo'd numeric filter is rejected, not silently dropped
    let req = test::TestRequest::get()
        .uri("/api/search/section?teacherId=abc&year=2024&semester=Spring")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "teacherId must be a number");

    let req = test::TestRequest::get()
        .uri("/api/search/section?classroomId=xyz&year=2024&semester=Spring")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "classroomId must be a number");

    let req = test::TestRequest::get()
        .uri("/api/search/section?teacherId=7&year=2024&semester=Spring")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "search completed");
    assert_eq!(body["data"], json!([]));

    // with nothing pending the engine reports a successful no-op
    let req = test::TestRequest::post()
        .uri("/api/schedule/auto")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "nothing to schedule");
    assert_eq!(body["data"]["scheduled"], true);

    let req = test::TestRequest::get().uri("/docs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["endpoints"].is_object());

    let _ = std::fs::remove_file(&db_path);
}
