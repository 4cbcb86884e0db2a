// MRV backtracking search over (slot block, room) options.
//
// One node = one call into `backtrack`. Everything an option changes is
// captured in an explicit delta and undone on failure, so sibling branches
// always start from identical bookings.

use std::collections::HashMap;

use serde::Serialize;

use crate::algorithm::options::{self, BookingState};
use crate::models::{
    Assignment, ClassroomId, Course, SearchConfig, Section, SectionId, Snapshot, TeacherId,
    TimeSlotId,
};

/// Final outcome of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every section received a (block, room) pair.
    AllScheduled(Vec<Assignment>),
    /// The search proved infeasibility or spent its node budget.
    Infeasible,
    /// The input batch was empty; a success no-op.
    NothingToSchedule,
}

impl SearchOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SearchOutcome::AllScheduled(_) => "all sections scheduled",
            SearchOutcome::Infeasible => "no feasible schedule",
            SearchOutcome::NothingToSchedule => "nothing to schedule",
        }
    }
}

/// Counters for one run, reported in logs and API responses.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub backtracks: u64,
    pub budget_exhausted: bool,
}

/// Run the backtracking search over an in-memory snapshot.
pub fn solve(snapshot: &Snapshot, config: &SearchConfig) -> (SearchOutcome, SearchStats) {
    if snapshot.sections.is_empty() {
        return (SearchOutcome::NothingToSchedule, SearchStats::default());
    }

    let avg_hours = snapshot.avg_required_hours();
    eprintln!(
        "🔎 [search] {} sections, {} rooms, {} slots, avg {:.1}h",
        snapshot.sections.len(),
        snapshot.rooms.len(),
        snapshot.slots.len(),
        avg_hours
    );

    let mut bookings = BookingState::new();
    let mut assignment: HashMap<SectionId, (Vec<TimeSlotId>, ClassroomId)> = HashMap::new();
    let mut stats = SearchStats::default();

    let ok = backtrack(
        snapshot,
        config,
        avg_hours,
        &mut bookings,
        &mut assignment,
        &mut stats,
    );

    if stats.budget_exhausted {
        eprintln!(
            "⛔ [search] node budget of {} spent, failing closed",
            config.max_nodes
        );
    }

    if !ok {
        eprintln!(
            "❌ [search] no feasible schedule ({} nodes, {} backtracks)",
            stats.nodes, stats.backtracks
        );
        return (SearchOutcome::Infeasible, stats);
    }

    // emit in section input order so output and commit are deterministic
    let assignments: Vec<Assignment> = snapshot
        .sections
        .iter()
        .filter_map(|sec| {
            assignment.get(&sec.sec_id).map(|(slots, room)| Assignment {
                sec_id: sec.sec_id,
                classroom_id: *room,
                time_slot_ids: slots.clone(),
            })
        })
        .collect();

    eprintln!(
        "✅ [search] all {} sections placed ({} nodes, {} backtracks)",
        assignments.len(),
        stats.nodes,
        stats.backtracks
    );
    (SearchOutcome::AllScheduled(assignments), stats)
}

/// Undo record for one applied option.
///
/// The evaluator never offers a slot the teacher or room already holds, so
/// every (teacher, slot) and (room, slot) pair booked here was absent
/// before; removing exactly those pairs restores the prior state.
struct Delta {
    teacher_id: TeacherId,
    classroom_id: ClassroomId,
    slot_ids: Vec<TimeSlotId>,
    prev_long_day: Option<i32>,
    cohort: String,
    prev_building: Option<String>,
}

fn backtrack(
    snapshot: &Snapshot,
    config: &SearchConfig,
    avg_hours: f64,
    bookings: &mut BookingState,
    assignment: &mut HashMap<SectionId, (Vec<TimeSlotId>, ClassroomId)>,
    stats: &mut SearchStats,
) -> bool {
    if stats.nodes >= config.max_nodes {
        stats.budget_exhausted = true;
        return false;
    }
    stats.nodes += 1;

    if assignment.len() == snapshot.sections.len() {
        return true;
    }

    // MRV: evaluate every pending section, keep the one with fewest options.
    // Any section with zero options kills the whole branch right away.
    let mut target: Option<(&Section, &Course)> = None;
    let mut target_options: Vec<(Vec<TimeSlotId>, ClassroomId)> = Vec::new();
    let mut min_opts = usize::MAX;

    for sec in &snapshot.sections {
        if assignment.contains_key(&sec.sec_id) {
            continue;
        }
        let course = match snapshot.courses.get(&sec.course_id) {
            Some(c) => c,
            // snapshot loading validates this; treat a hole as a dead end
            None => return false,
        };
        let opts = options::feasible_options(
            sec,
            course,
            snapshot,
            bookings,
            avg_hours,
            config.cohort_policy,
        );
        if opts.is_empty() {
            return false;
        }
        if opts.len() < min_opts {
            min_opts = opts.len();
            target = Some((sec, course));
            target_options = opts;
        }
    }

    let (target, course) = match target {
        Some(pair) => pair,
        None => return true,
    };

    let cohort = options::cohort_key(target, course);
    let is_long = options::is_long_course(course, avg_hours);

    // rooms in the cohort's fixed building go first; the rest stay as fallback
    if let Some(fixed) = bookings.cohort_buildings.get(&cohort).cloned() {
        target_options.sort_by_key(|(_, room_id)| {
            building_of(snapshot, *room_id).map_or(true, |b| b != fixed)
        });
    }

    for (slot_ids, room_id) in target_options {
        let delta = Delta {
            teacher_id: target.teacher_id,
            classroom_id: room_id,
            slot_ids: slot_ids.clone(),
            prev_long_day: bookings.long_course_day,
            cohort: cohort.clone(),
            prev_building: bookings.cohort_buildings.get(&cohort).cloned(),
        };

        apply_option(bookings, snapshot, &delta, is_long);
        assignment.insert(target.sec_id, (slot_ids, room_id));

        if backtrack(snapshot, config, avg_hours, bookings, assignment, stats) {
            return true;
        }

        stats.backtracks += 1;
        assignment.remove(&target.sec_id);
        undo_option(bookings, &delta);
    }

    false
}

fn building_of(snapshot: &Snapshot, room_id: ClassroomId) -> Option<String> {
    snapshot
        .rooms
        .iter()
        .find(|r| r.classroom_id == room_id)
        .map(|r| r.building.clone())
}

fn apply_option(bookings: &mut BookingState, snapshot: &Snapshot, delta: &Delta, is_long: bool) {
    for &slot_id in &delta.slot_ids {
        bookings
            .teacher_booked
            .entry(delta.teacher_id)
            .or_default()
            .insert(slot_id);
        bookings
            .room_booked
            .entry(delta.classroom_id)
            .or_default()
            .insert(slot_id);
    }
    // the first long course in a branch pins the day for the rest of it
    if is_long && bookings.long_course_day.is_none() {
        bookings.long_course_day = delta
            .slot_ids
            .first()
            .and_then(|id| snapshot.slots.iter().find(|s| s.time_slot_id == *id))
            .map(|s| s.day);
    }
    // likewise the first cohort member pins the cohort's building
    if !bookings.cohort_buildings.contains_key(&delta.cohort) {
        if let Some(building) = building_of(snapshot, delta.classroom_id) {
            bookings.cohort_buildings.insert(delta.cohort.clone(), building);
        }
    }
}

fn undo_option(bookings: &mut BookingState, delta: &Delta) {
    for &slot_id in &delta.slot_ids {
        if let Some(slots) = bookings.teacher_booked.get_mut(&delta.teacher_id) {
            slots.remove(&slot_id);
        }
        if let Some(slots) = bookings.room_booked.get_mut(&delta.classroom_id) {
            slots.remove(&slot_id);
        }
    }
    bookings.long_course_day = delta.prev_long_day;
    match &delta.prev_building {
        Some(prev) => {
            bookings
                .cohort_buildings
                .insert(delta.cohort.clone(), prev.clone());
        }
        None => {
            bookings.cohort_buildings.remove(&delta.cohort);
        }
    }
}
