// timetable.rs - Scheduling entry points around the search engine.
//
// auto_schedule runs the three-phase pipeline:
//   PHASE 1 snapshot: pending sections + courses + rooms + slots from SQLite
//   PHASE 2 search:   MRV backtracking over (slot block, room) options
//   PHASE 3 commit:   persist the whole solution in one transaction, or
//                     nothing at all
//
// modify_schedule is the manual override path: existence checks only, no
// conflict or cohesion rules, then a direct write.

use std::env;
use std::error::Error;

use rusqlite::Connection;
use serde::Serialize;

use crate::algorithm::solver::{self, SearchOutcome, SearchStats};
use crate::models::{Assignment, ClassroomId, SearchConfig, SectionId, TimeSlotId};
use crate::storage;

/// Result of one automatic run, shaped for the API layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub scheduled: bool,
    pub message: String,
    pub assignments: Vec<Assignment>,
    pub stats: SearchStats,
}

/// Run config from the environment; request fields may override it later.
pub fn config_from_env() -> SearchConfig {
    let mut config = SearchConfig::default();
    if let Ok(raw) = env::var("SCHEDULER_MAX_NODES") {
        if let Ok(n) = raw.trim().parse::<u64>() {
            config.max_nodes = n;
        }
    }
    config
}

/// Schedule every pending section, or prove it cannot be done.
///
/// Nothing is written unless the whole batch fits; an infeasible or
/// budget-exhausted run leaves the sections exactly as they were.
pub fn auto_schedule(
    conn: &mut Connection,
    config: &SearchConfig,
) -> Result<ScheduleReport, Box<dyn Error>> {
    eprintln!("🔁 [timetable] starting automatic run");

    let snapshot = storage::load_snapshot(conn)?;
    eprintln!(
        "📋 [snapshot] {} pending sections, {} courses, {} rooms, {} slots",
        snapshot.sections.len(),
        snapshot.courses.len(),
        snapshot.rooms.len(),
        snapshot.slots.len()
    );

    let (outcome, stats) = solver::solve(&snapshot, config);
    let message = outcome.message().to_string();

    match outcome {
        SearchOutcome::AllScheduled(assignments) => {
            let written = storage::commit_assignments(conn, &assignments)?;
            eprintln!("💾 [commit] {} sections persisted", written);
            Ok(ScheduleReport {
                scheduled: true,
                message,
                assignments,
                stats,
            })
        }
        SearchOutcome::Infeasible => Ok(ScheduleReport {
            scheduled: false,
            message,
            assignments: Vec::new(),
            stats,
        }),
        SearchOutcome::NothingToSchedule => Ok(ScheduleReport {
            scheduled: true,
            message,
            assignments: Vec::new(),
            stats,
        }),
    }
}

/// Place one section by hand. Only referential checks apply here; the
/// operator owns any conflicts this creates.
pub fn modify_schedule(
    conn: &Connection,
    sec_id: SectionId,
    classroom_id: ClassroomId,
    time_slot_ids: &[TimeSlotId],
) -> Result<(), Box<dyn Error>> {
    if time_slot_ids.is_empty() {
        return Err("time slot list must not be empty".into());
    }
    if !storage::section_exists(conn, sec_id)? {
        return Err("section not found".into());
    }
    if !storage::classroom_exists(conn, classroom_id)? {
        return Err("classroom not found".into());
    }
    for &slot_id in time_slot_ids {
        if !storage::time_slot_exists(conn, slot_id)? {
            return Err(format!("time slot {} not found", slot_id).into());
        }
    }

    storage::set_section_schedule(conn, sec_id, classroom_id, time_slot_ids)?;
    eprintln!(
        "✏️  [timetable] section {} manually placed in room {} over {} slot(s)",
        sec_id,
        classroom_id,
        time_slot_ids.len()
    );
    Ok(())
}
