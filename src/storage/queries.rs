use std::collections::{HashMap, HashSet};
use std::error::Error;

use rusqlite::{params, Connection, OptionalExtension, Params};

use crate::models::{
    Application, Classroom, ClassroomId, Course, CourseId, Section, SectionId, Snapshot, TeacherId,
    TimeSlot, TimeSlotId,
};

fn collect_sections<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Section>, Box<dyn Error>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok((
            row.get::<_, SectionId>(0)?,
            row.get::<_, CourseId>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i32>(3)?,
            row.get::<_, TeacherId>(4)?,
            row.get::<_, Option<ClassroomId>>(5)?,
            row.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut out = Vec::new();
    for row in rows {
        let (sec_id, course_id, semester, year, teacher_id, classroom_id, raw_slots) = row?;
        // slot chains are stored as JSON id arrays
        let time_slot_ids = match raw_slots {
            Some(s) => Some(serde_json::from_str::<Vec<TimeSlotId>>(&s)?),
            None => None,
        };
        out.push(Section {
            sec_id,
            course_id,
            semester,
            year,
            teacher_id,
            classroom_id,
            time_slot_ids,
        });
    }
    Ok(out)
}

fn classroom_from_row(row: &rusqlite::Row) -> rusqlite::Result<Classroom> {
    Ok(Classroom {
        classroom_id: row.get(0)?,
        campus: row.get(1)?,
        building: row.get(2)?,
        room_number: row.get(3)?,
        capacity: row.get(4)?,
        room_type: row.get(5)?,
    })
}

fn application_from_row(row: &rusqlite::Row) -> rusqlite::Result<Application> {
    Ok(Application {
        sec_id: row.get(0)?,
        reason: row.get(1)?,
        teacher: row.get(2)?,
        suggestion: row.get(3)?,
        final_decision: row.get::<_, i32>(4)? != 0,
    })
}

/// Sections still waiting for a room or a slot chain, in sec_id order.
pub fn load_unscheduled_sections(conn: &Connection) -> Result<Vec<Section>, Box<dyn Error>> {
    collect_sections(
        conn,
        "SELECT sec_id, course_id, semester, year, teacher_id, classroom_id, time_slot_ids
         FROM section WHERE classroom_id IS NULL OR time_slot_ids IS NULL ORDER BY sec_id",
        [],
    )
}

pub fn load_classrooms(conn: &Connection) -> Result<Vec<Classroom>, Box<dyn Error>> {
    let mut stmt = conn.prepare(
        "SELECT classroom_id, campus, building, room_number, capacity, room_type
         FROM classroom ORDER BY classroom_id",
    )?;
    let rows = stmt.query_map([], classroom_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_time_slots(conn: &Connection) -> Result<Vec<TimeSlot>, Box<dyn Error>> {
    let mut stmt = conn.prepare(
        "SELECT time_slot_id, day, start_time, end_time FROM time_slot ORDER BY time_slot_id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(TimeSlot {
            time_slot_id: row.get(0)?,
            day: row.get(1)?,
            start_time: row.get(2)?,
            end_time: row.get(3)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_courses_by_ids(
    conn: &Connection,
    ids: &[CourseId],
) -> Result<HashMap<CourseId, Course>, Box<dyn Error>> {
    let mut stmt = conn.prepare(
        "SELECT course_id, dept_name, capacity, required_room_type, required_hours
         FROM course WHERE course_id = ?1",
    )?;
    let mut map = HashMap::new();
    for &id in ids {
        let course = stmt
            .query_row(params![id], |row| {
                Ok(Course {
                    course_id: row.get(0)?,
                    dept_name: row.get(1)?,
                    capacity: row.get(2)?,
                    required_room_type: row.get(3)?,
                    required_hours: row.get(4)?,
                })
            })
            .optional()?;
        if let Some(c) = course {
            map.insert(c.course_id, c);
        }
    }
    Ok(map)
}

/// Load the read-only view one scheduling run works on: pending sections,
/// their courses, all rooms, all slots. Fails when a section references a
/// course that does not exist.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot, Box<dyn Error>> {
    let sections = load_unscheduled_sections(conn)?;

    let mut course_ids: Vec<CourseId> = sections.iter().map(|s| s.course_id).collect();
    course_ids.sort_unstable();
    course_ids.dedup();
    let courses = load_courses_by_ids(conn, &course_ids)?;

    for sec in &sections {
        if !courses.contains_key(&sec.course_id) {
            return Err(format!(
                "course {} not found for section {}",
                sec.course_id, sec.sec_id
            )
            .into());
        }
    }

    let rooms = load_classrooms(conn)?;
    let slots = load_time_slots(conn)?;
    Ok(Snapshot {
        sections,
        courses,
        rooms,
        slots,
    })
}

pub fn section_exists(conn: &Connection, sec_id: SectionId) -> Result<bool, Box<dyn Error>> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM section WHERE sec_id = ?1",
        params![sec_id],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

pub fn classroom_exists(conn: &Connection, id: ClassroomId) -> Result<bool, Box<dyn Error>> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM classroom WHERE classroom_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

pub fn time_slot_exists(conn: &Connection, id: TimeSlotId) -> Result<bool, Box<dyn Error>> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM time_slot WHERE time_slot_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

pub fn get_classroom(
    conn: &Connection,
    id: ClassroomId,
) -> Result<Option<Classroom>, Box<dyn Error>> {
    let room = conn
        .query_row(
            "SELECT classroom_id, campus, building, room_number, capacity, room_type
             FROM classroom WHERE classroom_id = ?1",
            params![id],
            classroom_from_row,
        )
        .optional()?;
    Ok(room)
}

pub fn find_classroom_by_campus_room(
    conn: &Connection,
    campus: &str,
    room_number: i32,
) -> Result<Option<Classroom>, Box<dyn Error>> {
    let room = conn
        .query_row(
            "SELECT classroom_id, campus, building, room_number, capacity, room_type
             FROM classroom WHERE campus = ?1 AND room_number = ?2",
            params![campus, room_number],
            classroom_from_row,
        )
        .optional()?;
    Ok(room)
}

/// True when any section is placed in the room.
pub fn classroom_in_use(conn: &Connection, id: ClassroomId) -> Result<bool, Box<dyn Error>> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM section WHERE classroom_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(n > 0)
}

/// Keyword lookup over campus, building and room type, plus exact id /
/// room-number matches when the keyword is numeric.
pub fn query_classrooms(
    conn: &Connection,
    keyword: &str,
) -> Result<Vec<Classroom>, Box<dyn Error>> {
    let trimmed = keyword.trim();
    let pattern = format!("%{}%", trimmed);
    let numeric: i64 = trimmed.parse().unwrap_or(-1);

    let mut stmt = conn.prepare(
        "SELECT classroom_id, campus, building, room_number, capacity, room_type
         FROM classroom
         WHERE campus LIKE ?1 OR building LIKE ?1 OR room_type LIKE ?1
            OR classroom_id = ?2 OR room_number = ?2
         ORDER BY classroom_id",
    )?;
    let rows = stmt.query_map(params![pattern, numeric], classroom_from_row)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_application(
    conn: &Connection,
    sec_id: SectionId,
) -> Result<Option<Application>, Box<dyn Error>> {
    let app = conn
        .query_row(
            "SELECT sec_id, reason, teacher, suggestion, final_decision
             FROM application WHERE sec_id = ?1",
            params![sec_id],
            application_from_row,
        )
        .optional()?;
    Ok(app)
}

/// One page of applications, 1-based, in sec_id order, with the total count.
pub fn query_applications(
    conn: &Connection,
    page: i64,
    size: i64,
) -> Result<(i64, Vec<Application>), Box<dyn Error>> {
    let page = page.max(1);
    let size = size.max(1);
    let total: i64 = conn.query_row("SELECT COUNT(*) FROM application", [], |row| row.get(0))?;

    let mut stmt = conn.prepare(
        "SELECT sec_id, reason, teacher, suggestion, final_decision
         FROM application ORDER BY sec_id LIMIT ?1 OFFSET ?2",
    )?;
    // page and size come straight from the request
    let offset = (page - 1).saturating_mul(size);
    let rows = stmt.query_map(params![size, offset], application_from_row)?;
    let mut items = Vec::new();
    for r in rows {
        items.push(r?);
    }
    Ok((total, items))
}

/// Section search: by teacher, by room, or the intersection of both, then
/// narrowed to one academic term. At least one of the two ids is required.
pub fn search_sections(
    conn: &Connection,
    teacher_id: Option<TeacherId>,
    classroom_id: Option<ClassroomId>,
    year: i32,
    semester: &str,
) -> Result<Vec<Section>, Box<dyn Error>> {
    let by_teacher_sql = "SELECT sec_id, course_id, semester, year, teacher_id, classroom_id, time_slot_ids
         FROM section WHERE teacher_id = ?1 ORDER BY sec_id";
    let by_room_sql = "SELECT sec_id, course_id, semester, year, teacher_id, classroom_id, time_slot_ids
         FROM section WHERE classroom_id = ?1 ORDER BY sec_id";

    let mut sections = match (teacher_id, classroom_id) {
        (Some(t), Some(r)) => {
            let by_teacher = collect_sections(conn, by_teacher_sql, params![t])?;
            let by_room: HashSet<SectionId> = collect_sections(conn, by_room_sql, params![r])?
                .into_iter()
                .map(|s| s.sec_id)
                .collect();
            by_teacher
                .into_iter()
                .filter(|s| by_room.contains(&s.sec_id))
                .collect()
        }
        (Some(t), None) => collect_sections(conn, by_teacher_sql, params![t])?,
        (None, Some(r)) => collect_sections(conn, by_room_sql, params![r])?,
        (None, None) => return Err("teacherId and classroomId cannot both be empty".into()),
    };

    sections.retain(|s| s.year == year && s.semester.eq_ignore_ascii_case(semester));
    Ok(sections)
}
