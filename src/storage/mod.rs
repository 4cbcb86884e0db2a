pub mod db;
pub mod insertions;
pub mod queries;

pub use db::{init_db, open_db, scheduler_db_path};
pub use insertions::{
    add_application, add_classroom, commit_assignments, delete_classroom, insert_course,
    insert_section, insert_time_slot, modify_classroom, process_application,
    set_section_schedule,
};
pub use queries::{
    classroom_exists, classroom_in_use, find_application, find_classroom_by_campus_room,
    get_classroom, load_classrooms, load_courses_by_ids, load_snapshot, load_time_slots,
    load_unscheduled_sections, query_applications, query_classrooms, search_sections,
    section_exists, time_slot_exists,
};
