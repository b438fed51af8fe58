// Application layer - Use cases over the drilling repository
pub mod auth_service;
pub mod drilling_repository;
pub mod error;
pub mod history_service;

#[cfg(test)]
pub mod testing;
