pub mod flight;
pub mod report;
pub mod reservation;
pub mod user;
