//! Utilidades del sistema
//!
//! Este módulo contiene los helpers de errores, JWT y validación.

pub mod errors;
pub mod jwt;
pub mod validation;
