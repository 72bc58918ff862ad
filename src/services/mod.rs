// src/services/mod.rs

pub mod cache;
pub mod date_filter;
pub mod fmp;
pub mod format;
pub mod pagination;
