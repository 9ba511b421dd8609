//! Learning Navigator - Main Entry Point
//!
//! Starts the web API server for the Learning Navigator.

use learning_navigator::api::run_server;
use learning_navigator::config::NavigatorConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Wise Learning Navigator                      ║");
    println!("║   Goals → Paths → Progress                     ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();

    run_server(NavigatorConfig::from_env()).await
}
