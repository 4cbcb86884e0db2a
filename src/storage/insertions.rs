use std::error::Error;

use rusqlite::{params, Connection};

use crate::models::{
    Application, Assignment, Classroom, ClassroomId, Course, Section, SectionId, TimeSlot,
    TimeSlotId,
};
use crate::storage::queries::{
    classroom_in_use, find_application, find_classroom_by_campus_room, get_classroom,
    section_exists,
};

pub fn insert_course(conn: &Connection, course: &Course) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO course (course_id, dept_name, capacity, required_room_type, required_hours)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            course.course_id,
            course.dept_name,
            course.capacity,
            course.required_room_type,
            course.required_hours,
        ],
    )?;
    Ok(())
}

pub fn insert_time_slot(conn: &Connection, slot: &TimeSlot) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO time_slot (time_slot_id, day, start_time, end_time) VALUES (?1, ?2, ?3, ?4)",
        params![slot.time_slot_id, slot.day, slot.start_time, slot.end_time],
    )?;
    Ok(())
}

pub fn insert_section(conn: &Connection, section: &Section) -> Result<(), Box<dyn Error>> {
    let slots_json = match &section.time_slot_ids {
        Some(ids) => Some(serde_json::to_string(ids)?),
        None => None,
    };
    conn.execute(
        "INSERT INTO section (sec_id, course_id, semester, year, teacher_id, classroom_id, time_slot_ids)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            section.sec_id,
            section.course_id,
            section.semester,
            section.year,
            section.teacher_id,
            section.classroom_id,
            slots_json,
        ],
    )?;
    Ok(())
}

/// Create a classroom after the usual checks: campus present, positive
/// capacity and room number, no other room with the same campus + number.
pub fn add_classroom(
    conn: &Connection,
    campus: Option<&str>,
    capacity: Option<i32>,
    building: Option<&str>,
    room_number: Option<i32>,
    room_type: Option<&str>,
) -> Result<Classroom, Box<dyn Error>> {
    let campus = match campus {
        Some(c) if !c.trim().is_empty() => c.trim(),
        _ => return Err("campus must not be empty".into()),
    };
    let capacity = match capacity {
        Some(c) if c > 0 => c,
        _ => return Err("capacity must be positive".into()),
    };
    let room_number = match room_number {
        Some(n) if n > 0 => n,
        _ => return Err("room number must be positive".into()),
    };
    if find_classroom_by_campus_room(conn, campus, room_number)?.is_some() {
        return Err("classroom already exists".into());
    }

    let building = building.unwrap_or("");
    let room_type = match room_type {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => "lecture",
    };

    conn.execute(
        "INSERT INTO classroom (campus, building, room_number, capacity, room_type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![campus, building, room_number, capacity, room_type],
    )?;

    let id = conn.last_insert_rowid() as ClassroomId;
    Ok(Classroom {
        classroom_id: id,
        campus: campus.to_string(),
        building: building.to_string(),
        room_number,
        capacity,
        room_type: room_type.to_string(),
    })
}

/// Update the provided classroom fields; at least one must apply.
pub fn modify_classroom(
    conn: &Connection,
    classroom_id: Option<ClassroomId>,
    campus: Option<&str>,
    capacity: Option<i32>,
    building: Option<&str>,
    room_type: Option<&str>,
) -> Result<Classroom, Box<dyn Error>> {
    let id = match classroom_id {
        Some(id) => id,
        None => return Err("classroom id is required".into()),
    };
    let mut room = match get_classroom(conn, id)? {
        Some(room) => room,
        None => return Err("classroom not found".into()),
    };

    let mut changed = false;
    if let Some(c) = campus {
        if !c.trim().is_empty() {
            room.campus = c.trim().to_string();
            changed = true;
        }
    }
    if let Some(c) = capacity {
        if c > 0 {
            room.capacity = c;
            changed = true;
        }
    }
    if let Some(b) = building {
        room.building = b.to_string();
        changed = true;
    }
    if let Some(t) = room_type {
        if !t.trim().is_empty() {
            room.room_type = t.trim().to_string();
            changed = true;
        }
    }
    if !changed {
        return Err("no fields to modify".into());
    }

    conn.execute(
        "UPDATE classroom SET campus = ?1, building = ?2, capacity = ?3, room_type = ?4
         WHERE classroom_id = ?5",
        params![room.campus, room.building, room.capacity, room.room_type, id],
    )?;
    Ok(room)
}

/// Remove a classroom unless some section still sits in it.
pub fn delete_classroom(
    conn: &Connection,
    classroom_id: Option<ClassroomId>,
) -> Result<(), Box<dyn Error>> {
    let id = match classroom_id {
        Some(id) => id,
        None => return Err("classroom id is required".into()),
    };
    if get_classroom(conn, id)?.is_none() {
        return Err("classroom not found".into());
    }
    if classroom_in_use(conn, id)? {
        return Err("classroom is in use".into());
    }
    conn.execute(
        "DELETE FROM classroom WHERE classroom_id = ?1",
        params![id],
    )?;
    Ok(())
}

/// File a scheduling-change application for a section. One per section.
pub fn add_application(
    conn: &Connection,
    sec_id: Option<SectionId>,
    reason: Option<&str>,
    teacher: Option<&str>,
) -> Result<Application, Box<dyn Error>> {
    let sec_id = match sec_id {
        Some(id) => id,
        None => return Err("section id is required".into()),
    };
    let reason = match reason {
        Some(r) if !r.trim().is_empty() => r.trim(),
        _ => return Err("reason must not be empty".into()),
    };
    let teacher = match teacher {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => return Err("teacher must not be empty".into()),
    };
    if !section_exists(conn, sec_id)? {
        return Err("section not found".into());
    }
    if find_application(conn, sec_id)?.is_some() {
        return Err("application already exists for this section".into());
    }

    conn.execute(
        "INSERT INTO application (sec_id, reason, teacher, suggestion, final_decision)
         VALUES (?1, ?2, ?3, NULL, 0)",
        params![sec_id, reason, teacher],
    )?;
    Ok(Application {
        sec_id,
        reason: reason.to_string(),
        teacher: teacher.to_string(),
        suggestion: None,
        final_decision: false,
    })
}

/// Record the staff decision on an application.
pub fn process_application(
    conn: &Connection,
    sec_id: Option<SectionId>,
    suggestion: Option<&str>,
    final_decision: Option<bool>,
) -> Result<Application, Box<dyn Error>> {
    let sec_id = match sec_id {
        Some(id) => id,
        None => return Err("section id is required".into()),
    };
    let suggestion = match suggestion {
        Some(s) if !s.trim().is_empty() => s.trim(),
        _ => return Err("suggestion must not be empty".into()),
    };
    let final_decision = match final_decision {
        Some(d) => d,
        None => return Err("final decision is required".into()),
    };
    let mut app = match find_application(conn, sec_id)? {
        Some(app) => app,
        None => return Err("application not found".into()),
    };

    conn.execute(
        "UPDATE application SET suggestion = ?1, final_decision = ?2 WHERE sec_id = ?3",
        params![suggestion, final_decision as i32, sec_id],
    )?;
    app.suggestion = Some(suggestion.to_string());
    app.final_decision = final_decision;
    Ok(app)
}

/// Write one section's placement. Used by the manual override path.
pub fn set_section_schedule(
    conn: &Connection,
    sec_id: SectionId,
    classroom_id: ClassroomId,
    time_slot_ids: &[TimeSlotId],
) -> Result<(), Box<dyn Error>> {
    let slots_json = serde_json::to_string(time_slot_ids)?;
    conn.execute(
        "UPDATE section SET classroom_id = ?1, time_slot_ids = ?2 WHERE sec_id = ?3",
        params![classroom_id, slots_json, sec_id],
    )?;
    Ok(())
}

/// Persist a full solution in one transaction. Every section must still
/// exist; otherwise nothing is written.
pub fn commit_assignments(
    conn: &mut Connection,
    assignments: &[Assignment],
) -> Result<usize, Box<dyn Error>> {
    let tx = conn.transaction()?;
    for a in assignments {
        let slots_json = serde_json::to_string(&a.time_slot_ids)?;
        let updated = tx.execute(
            "UPDATE section SET classroom_id = ?1, time_slot_ids = ?2 WHERE sec_id = ?3",
            params![a.classroom_id, slots_json, a.sec_id],
        )?;
        if updated != 1 {
            // dropping the open transaction rolls everything back
            return Err(format!("section {} vanished during commit", a.sec_id).into());
        }
    }
    tx.commit()?;
    Ok(assignments.len())
}
