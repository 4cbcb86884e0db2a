use rusqlite::Connection;
use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

// load .env at module init if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Path to the scheduler DB. Honors SCHEDULER_DB_PATH from the environment.
pub fn scheduler_db_path() -> PathBuf {
    load_dotenv();
    match env::var("SCHEDULER_DB_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => PathBuf::from("data").join("scheduler.db"),
    }
}

/// Open the scheduler DB, creating its parent directory when missing.
pub fn open_db() -> Result<Connection, Box<dyn Error>> {
    let path = scheduler_db_path();
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(Connection::open(path)?)
}

/// Create every table the service uses. Idempotent, safe to run at startup.
pub fn init_db(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS course (
            course_id INTEGER PRIMARY KEY,
            dept_name TEXT NOT NULL,
            capacity INTEGER NOT NULL,
            required_room_type TEXT NOT NULL,
            required_hours INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS section (
            sec_id INTEGER PRIMARY KEY,
            course_id INTEGER NOT NULL,
            semester TEXT NOT NULL,
            year INTEGER NOT NULL,
            teacher_id INTEGER NOT NULL,
            classroom_id INTEGER,
            time_slot_ids TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS classroom (
            classroom_id INTEGER PRIMARY KEY AUTOINCREMENT,
            campus TEXT NOT NULL,
            building TEXT NOT NULL DEFAULT '',
            room_number INTEGER NOT NULL,
            capacity INTEGER NOT NULL,
            room_type TEXT NOT NULL DEFAULT 'lecture'
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS time_slot (
            time_slot_id INTEGER PRIMARY KEY,
            day INTEGER NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS application (
            sec_id INTEGER PRIMARY KEY,
            reason TEXT NOT NULL,
            teacher TEXT NOT NULL,
            suggestion TEXT,
            final_decision INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    Ok(())
}
