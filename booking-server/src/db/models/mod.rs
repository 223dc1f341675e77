//! Database Models

// Serde helpers
pub mod serde_helpers;

// Booking
pub mod reservation;

// Fleet
pub mod train;

// Accounts
pub mod user;

// Catalog
pub mod route;
pub mod schedule;

// Re-exports
pub use reservation::{
    Reservation, ReservationCreate, ReservationRequestCreate, ReservationStatus, ReservationUpdate,
};
pub use route::{Route, RouteCreate, RouteUpdate};
pub use schedule::{Schedule, ScheduleCreate, ScheduleUpdate};
pub use train::{Train, TrainCreate, TrainForBooking, TrainUpdate};
pub use user::{User, UserCreate, UserRole, UserUpdate, is_valid_nic};
