// src/handlers/mod.rs

pub mod api;
pub mod earnings;
pub mod error;
pub mod stock;
