//! Servicios de colaboradores externos
//!
//! Email transaccional, geocoding/ruteo y billing. Las reglas de negocio
//! viven en los controllers; acá solo hay integración HTTP.

pub mod billing_service;
pub mod geo_service;
pub mod mailer_service;
