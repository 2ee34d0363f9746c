// Services Module
// Business logic behind the HTTP handlers

pub mod diagnostic;
pub mod format;
pub mod holders_service;
pub mod stats_service;
pub mod sync_service;
