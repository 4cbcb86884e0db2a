// Contiguous slot-block construction: chains same-day slots back to back
// until a course's required hours are covered.

use crate::models::{TimeSlot, TimeSlotId};

/// Build the slot chain that starts at `start` and covers `needed_hours`.
///
/// The chain grows strictly forward: at each step the next slot must be on
/// the same day and begin exactly where the chain currently ends. Returns
/// the ordered slot ids once the accumulated duration reaches the target,
/// or an empty vec when no such chain exists from this starting slot.
pub fn find_contiguous_block(
    start: &TimeSlot,
    all_slots: &[TimeSlot],
    needed_hours: i32,
) -> Vec<TimeSlotId> {
    let (_, mut chain_end) = match start.parsed_times() {
        Some(times) => times,
        None => return vec![],
    };

    let mut chain = vec![start.time_slot_id];
    let mut covered = start.duration_hours();

    while covered < i64::from(needed_hours) {
        // next link: same day, starts exactly at the current chain end
        let next = all_slots.iter().find(|s| {
            s.day == start.day
                && !chain.contains(&s.time_slot_id)
                && s.parsed_times().map(|(st, _)| st == chain_end).unwrap_or(false)
        });

        match next {
            Some(slot) => {
                let (_, end) = match slot.parsed_times() {
                    Some(times) => times,
                    None => return vec![],
                };
                chain.push(slot.time_slot_id);
                covered += slot.duration_hours();
                chain_end = end;
            }
            None => return vec![],
        }
    }

    chain
}
