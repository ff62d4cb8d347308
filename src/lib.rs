//! Freight Board - backend del load board
//!
//! API REST para publicar loads, someter booking requests, manejar el
//! ciclo de vida de booking y los boards de capacidad.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
