//! DTOs de la API
//!
//! Requests y responses de cada recurso, separados de los modelos
//! de persistencia.

pub mod auth_dto;
pub mod billing_dto;
pub mod common;
pub mod driver_dto;
pub mod geo_dto;
pub mod load_dto;
pub mod message_dto;
pub mod request_dto;
pub mod truck_dto;

pub use common::ApiResponse;
