//! Railway Booking Server - train seat reservation backend
//!
//! # Architecture overview
//!
//! The server keeps three kinds of state consistent while travelers book
//! seats concurrently: reservation documents, per-train seat occupancy
//! counters, and the reservation-id back-reference lists on trains and
//! users. All occupancy mutations flow through a single checked component
//! (`booking::SeatInventory`) so a seat is never oversold.
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # Config, state, server, error
//! ├── booking/       # Reservation engine, seat inventory, fare, policy
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SurrealDB models and repositories
//! └── utils/         # Logging and shared helpers
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use booking::{BookingError, ReservationEngine, SeatClass, SeatInventory};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging. Called once from `main`.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ___       _ ______          __
  / _ \___ _(_) / _ )___  ___ / /__
 / , _/ _ `/ / / _  / _ \/ _ \  '_/
/_/|_|\_,_/_/_/____/\___/\___/_/\_\
    "#
    );
}
