pub mod auth_controller;
pub mod booking_controller;
pub mod driver_controller;
pub mod load_controller;
pub mod message_controller;
pub mod truck_controller;
