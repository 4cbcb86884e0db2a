/// Full pipeline tests: seed an in-memory database, run the automatic
/// scheduler, and check what was (or was not) persisted.
use rusqlite::Connection;

use slotfit::algorithm::{auto_schedule, modify_schedule};
use slotfit::models::{Course, SearchConfig, Section, TimeSlot};
use slotfit::storage;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory db");
    storage::init_db(&conn).expect("schema");
    conn
}

fn seed_course(conn: &Connection, id: i32, cap: i32, room_type: &str, hours: i32) {
    let course = Course {
        course_id: id,
        dept_name: "physics".to_string(),
        capacity: cap,
        required_room_type: room_type.to_string(),
        required_hours: hours,
    };
    storage::insert_course(conn, &course).expect("seed course");
}

fn seed_pending_section(conn: &Connection, sec_id: i32, course_id: i32, teacher: i32) {
    let section = Section {
        sec_id,
        course_id,
        semester: "Spring".to_string(),
        year: 2024,
        teacher_id: teacher,
        classroom_id: None,
        time_slot_ids: None,
    };
    storage::insert_section(conn, &section).expect("seed section");
}

/// Four consecutive one-hour slots on `day`, ids from `first_id`.
fn seed_hourly_slots(conn: &Connection, day: i32, first_id: i32) {
    let hours = ["08:00", "09:00", "10:00", "11:00", "12:00"];
    for i in 0..4 {
        let slot = TimeSlot {
            time_slot_id: first_id + i,
            day,
            start_time: hours[i as usize].to_string(),
            end_time: hours[i as usize + 1].to_string(),
        };
        storage::insert_time_slot(conn, &slot).expect("seed slot");
    }
}

fn read_section(conn: &Connection, teacher: i32, sec_id: i32) -> Section {
    storage::search_sections(conn, Some(teacher), None, 2024, "Spring")
        .expect("search")
        .into_iter()
        .find(|s| s.sec_id == sec_id)
        .expect("section row")
}

#[test]
fn auto_schedule_places_every_pending_section() {
    eprintln!("\n🔬 TEST: automatic run over the lecture/lab batch");
    let mut conn = test_conn();
    seed_course(&conn, 100, 30, "lecture", 2);
    seed_course(&conn, 200, 20, "lab", 3);
    seed_pending_section(&conn, 1, 100, 7);
    seed_pending_section(&conn, 2, 200, 8);
    let lecture =
        storage::add_classroom(&conn, Some("main"), Some(40), Some("A"), Some(101), None)
            .expect("lecture room");
    let lab = storage::add_classroom(&conn, Some("main"), Some(25), Some("A"), Some(102), Some("lab"))
        .expect("lab room");
    seed_hourly_slots(&conn, 1, 1);
    seed_hourly_slots(&conn, 2, 5);

    let report = auto_schedule(&mut conn, &SearchConfig::default()).expect("run");
    eprintln!("  outcome: {} ({} nodes)", report.message, report.stats.nodes);

    assert!(report.scheduled);
    assert_eq!(report.message, "all sections scheduled");
    assert_eq!(report.assignments.len(), 2);

    let pending = storage::load_unscheduled_sections(&conn).expect("pending");
    assert!(pending.is_empty(), "nothing may remain unscheduled");

    let sec1 = read_section(&conn, 7, 1);
    assert_eq!(sec1.classroom_id, Some(lecture.classroom_id));
    assert_eq!(sec1.time_slot_ids.as_ref().map(Vec::len), Some(2));

    let sec2 = read_section(&conn, 8, 2);
    assert_eq!(sec2.classroom_id, Some(lab.classroom_id));
    assert_eq!(sec2.time_slot_ids.as_ref().map(Vec::len), Some(3));
}

#[test]
fn auto_schedule_writes_nothing_when_infeasible() {
    eprintln!("\n🔬 TEST: infeasible batch leaves the database untouched");
    let mut conn = test_conn();
    seed_course(&conn, 200, 20, "lab", 3);
    seed_pending_section(&conn, 1, 200, 7);
    // only a lecture room exists, the lab course can never be placed
    storage::add_classroom(&conn, Some("main"), Some(40), Some("A"), Some(101), None)
        .expect("lecture room");
    seed_hourly_slots(&conn, 1, 1);

    let report = auto_schedule(&mut conn, &SearchConfig::default()).expect("run");

    assert!(!report.scheduled);
    assert_eq!(report.message, "no feasible schedule");
    assert!(report.assignments.is_empty());

    let pending = storage::load_unscheduled_sections(&conn).expect("pending");
    assert_eq!(pending.len(), 1, "the section must still be pending");
    assert!(pending[0].classroom_id.is_none());
    assert!(pending[0].time_slot_ids.is_none());
}

#[test]
fn auto_schedule_reports_empty_batches_as_noop() {
    eprintln!("\n🔬 TEST: nothing to schedule");
    let mut conn = test_conn();

    let report = auto_schedule(&mut conn, &SearchConfig::default()).expect("run");
    assert!(report.scheduled);
    assert_eq!(report.message, "nothing to schedule");
    assert!(report.assignments.is_empty());
    assert_eq!(report.stats.nodes, 0);
}

#[test]
fn auto_schedule_leaves_already_scheduled_sections_alone() {
    eprintln!("\n🔬 TEST: committed sections stay out of later runs");
    let mut conn = test_conn();
    seed_course(&conn, 100, 30, "lecture", 2);
    let room = storage::add_classroom(&conn, Some("main"), Some(40), Some("A"), Some(101), None)
        .expect("room");
    seed_hourly_slots(&conn, 1, 1);

    // section 3 was placed in an earlier run
    let placed = Section {
        sec_id: 3,
        course_id: 100,
        semester: "Spring".to_string(),
        year: 2024,
        teacher_id: 9,
        classroom_id: Some(room.classroom_id),
        time_slot_ids: Some(vec![3, 4]),
    };
    storage::insert_section(&conn, &placed).expect("seed placed section");
    seed_pending_section(&conn, 1, 100, 7);

    let report = auto_schedule(&mut conn, &SearchConfig::default()).expect("run");
    assert!(report.scheduled);
    assert_eq!(report.assignments.len(), 1, "only the pending section is in the batch");
    assert_eq!(report.assignments[0].sec_id, 1);

    let sec3 = read_section(&conn, 9, 3);
    assert_eq!(sec3.classroom_id, Some(room.classroom_id));
    assert_eq!(sec3.time_slot_ids, Some(vec![3, 4]), "earlier placement untouched");
}

#[test]
fn manual_override_checks_references_then_writes() {
    eprintln!("\n🔬 TEST: manual override path");
    let conn = test_conn();
    seed_course(&conn, 100, 30, "lecture", 2);
    seed_pending_section(&conn, 1, 100, 7);
    let room = storage::add_classroom(&conn, Some("main"), Some(40), Some("A"), Some(101), None)
        .expect("room");
    seed_hourly_slots(&conn, 1, 1);

    let err = modify_schedule(&conn, 1, room.classroom_id, &[]).expect_err("empty slot list");
    assert_eq!(err.to_string(), "time slot list must not be empty");

    let err = modify_schedule(&conn, 99, room.classroom_id, &[1]).expect_err("unknown section");
    assert_eq!(err.to_string(), "section not found");

    let err = modify_schedule(&conn, 1, room.classroom_id + 50, &[1]).expect_err("unknown room");
    assert_eq!(err.to_string(), "classroom not found");

    let err = modify_schedule(&conn, 1, room.classroom_id, &[1, 42]).expect_err("unknown slot");
    assert_eq!(err.to_string(), "time slot 42 not found");

    // no conflict checks here: the override lands exactly as requested
    modify_schedule(&conn, 1, room.classroom_id, &[2, 3]).expect("override");
    let sec = read_section(&conn, 7, 1);
    assert_eq!(sec.classroom_id, Some(room.classroom_id));
    assert_eq!(sec.time_slot_ids, Some(vec![2, 3]));
}
