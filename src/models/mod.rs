//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod driver;
pub mod load;
pub mod load_request;
pub mod message;
pub mod posted_truck;
pub mod token;
pub mod user;
