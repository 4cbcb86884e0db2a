// Core domain structures shared by the scheduler, storage and API layers.

use std::collections::HashMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub type SectionId = i32;
pub type CourseId = i32;
pub type ClassroomId = i32;
pub type TimeSlotId = i32;
pub type TeacherId = i32;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: CourseId,
    pub dept_name: String,
    /// Minimum seat count the assigned room must offer.
    pub capacity: i32,
    pub required_room_type: String,
    /// Weekly contact hours; drives block length and the long-course rule.
    pub required_hours: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub sec_id: SectionId,
    pub course_id: CourseId,
    pub semester: String,
    pub year: i32,
    pub teacher_id: TeacherId,
    pub classroom_id: Option<ClassroomId>,
    /// Ordered slot chain once scheduled, None while pending.
    pub time_slot_ids: Option<Vec<TimeSlotId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub classroom_id: ClassroomId,
    pub campus: String,
    pub building: String,
    pub room_number: i32,
    pub capacity: i32,
    pub room_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time_slot_id: TimeSlotId,
    /// Weekday index (1 = Monday .. 7 = Sunday).
    pub day: i32,
    pub start_time: String, // "HH:MM"
    pub end_time: String,   // "HH:MM"
}

impl TimeSlot {
    pub fn parsed_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(&self.end_time, "%H:%M").ok()?;
        Some((start, end))
    }

    /// Whole hours between start and end; 0 when the times are malformed.
    pub fn duration_hours(&self) -> i64 {
        match self.parsed_times() {
            Some((start, end)) => (end - start).num_hours().max(0),
            None => 0,
        }
    }
}

/// A teacher's request to change a section's placement, reviewed by staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub sec_id: SectionId,
    pub reason: String,
    pub teacher: String,
    pub suggestion: Option<String>,
    pub final_decision: bool,
}

/// One solved placement: the room plus the ordered slot chain for a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub sec_id: SectionId,
    pub classroom_id: ClassroomId,
    pub time_slot_ids: Vec<TimeSlotId>,
}

/// Read-only view of everything one scheduling run needs, loaded up front.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub sections: Vec<Section>,
    pub courses: HashMap<CourseId, Course>,
    pub rooms: Vec<Classroom>,
    pub slots: Vec<TimeSlot>,
}

impl Snapshot {
    /// Average required hours over the distinct courses in the batch.
    /// Courses strictly above this are "long" and pinned to a single day.
    pub fn avg_required_hours(&self) -> f64 {
        if self.courses.is_empty() {
            return 0.0;
        }
        let total: i32 = self.courses.values().map(|c| c.required_hours).sum();
        f64::from(total) / self.courses.len() as f64
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CohortBuildingPolicy {
    /// Rooms outside the cohort's fixed building are rejected outright.
    Hard,
    /// Matching rooms are tried first; mismatches stay on the list.
    #[default]
    Prefer,
}

pub const DEFAULT_MAX_NODES: u64 = 1_000_000;

/// Knobs for one scheduling run.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Node budget for the backtracking search; the run fails closed once spent.
    pub max_nodes: u64,
    pub cohort_policy: CohortBuildingPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_nodes: DEFAULT_MAX_NODES,
            cohort_policy: CohortBuildingPolicy::Prefer,
        }
    }
}
