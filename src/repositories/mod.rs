//! Repositorios de persistencia
//!
//! Acceso CRUD tipado por entidad sobre PostgreSQL. Ninguna regla de
//! negocio vive acá más allá de filtros y guards compare-and-swap.

pub mod driver_repository;
pub mod load_repository;
pub mod message_repository;
pub mod request_repository;
pub mod token_repository;
pub mod truck_repository;
pub mod user_repository;
