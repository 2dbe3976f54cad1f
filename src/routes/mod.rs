pub mod auth_route;
pub mod flight_route;
pub mod report_route;
pub mod reservation_route;
pub mod user_route;
