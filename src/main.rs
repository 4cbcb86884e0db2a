// --- Course Section Scheduler - main entry point ---

use slotfit::{run_server, storage};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    println!("=== Course Section Scheduler (API) ===");

    match storage::open_db().and_then(|conn| storage::init_db(&conn)) {
        Ok(()) => eprintln!(
            "🗄️ [startup] database ready at {}",
            storage::scheduler_db_path().display()
        ),
        Err(e) => {
            return Err(std::io::Error::other(format!(
                "database init failed: {}",
                e
            )))
        }
    }

    let bind = "127.0.0.1:8080";
    println!("Starting server at http://{}", bind);
    run_server(bind).await
}
