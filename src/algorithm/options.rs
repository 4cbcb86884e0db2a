// Feasible-option enumeration: every (slot block, room) pair a section can
// legally take under the current bookings and branch policies.

use std::collections::{HashMap, HashSet};

use crate::algorithm::blocks::find_contiguous_block;
use crate::models::{
    ClassroomId, CohortBuildingPolicy, Course, Section, Snapshot, TeacherId, TimeSlotId,
};

/// Mutable per-run booking state. Owned by one search run, never shared.
#[derive(Debug, Default)]
pub struct BookingState {
    pub teacher_booked: HashMap<TeacherId, HashSet<TimeSlotId>>,
    pub room_booked: HashMap<ClassroomId, HashSet<TimeSlotId>>,
    /// Day fixed by the first long course assigned in this branch.
    pub long_course_day: Option<i32>,
    /// Cohort key -> building fixed by the first cohort member assigned.
    pub cohort_buildings: HashMap<String, String>,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teacher_has(&self, teacher: TeacherId, slot: TimeSlotId) -> bool {
        self.teacher_booked
            .get(&teacher)
            .map_or(false, |slots| slots.contains(&slot))
    }

    pub fn room_has(&self, room: ClassroomId, slot: TimeSlotId) -> bool {
        self.room_booked
            .get(&room)
            .map_or(false, |slots| slots.contains(&slot))
    }
}

/// Cohort key: grade year plus department, e.g. `"3_Mathematics"`.
pub fn cohort_key(section: &Section, course: &Course) -> String {
    format!("{}_{}", section.year, course.dept_name)
}

/// Long courses need strictly more hours than the batch average.
pub fn is_long_course(course: &Course, avg_hours: f64) -> bool {
    f64::from(course.required_hours) > avg_hours
}

/// Enumerate every feasible (slot block, room) option for `section`.
///
/// Slots and rooms are walked in snapshot order, so the result order is
/// stable for identical inputs. An empty result means this branch is a
/// dead end for the section.
pub fn feasible_options(
    section: &Section,
    course: &Course,
    snapshot: &Snapshot,
    bookings: &BookingState,
    avg_hours: f64,
    policy: CohortBuildingPolicy,
) -> Vec<(Vec<TimeSlotId>, ClassroomId)> {
    let is_long = is_long_course(course, avg_hours);
    let fixed_building = bookings.cohort_buildings.get(&cohort_key(section, course));

    let mut opts = Vec::new();

    for slot in &snapshot.slots {
        if bookings.teacher_has(section.teacher_id, slot.time_slot_id) {
            continue;
        }
        if is_long {
            if let Some(day) = bookings.long_course_day {
                if slot.day != day {
                    continue;
                }
            }
        }

        let block = find_contiguous_block(slot, &snapshot.slots, course.required_hours);
        if block.is_empty() {
            continue;
        }
        // the chain may run through slots the teacher already holds
        if block
            .iter()
            .any(|&id| bookings.teacher_has(section.teacher_id, id))
        {
            continue;
        }

        for room in &snapshot.rooms {
            if block
                .iter()
                .any(|&id| bookings.room_has(room.classroom_id, id))
            {
                continue;
            }
            if room.capacity < course.capacity {
                continue;
            }
            if !room.room_type.eq_ignore_ascii_case(&course.required_room_type) {
                continue;
            }
            if policy == CohortBuildingPolicy::Hard {
                if let Some(building) = fixed_building {
                    if &room.building != building {
                        continue;
                    }
                }
            }
            opts.push((block.clone(), room.classroom_id));
        }
    }

    opts
}
