/// Application layer - Use cases, DTOs and read models
///
/// This layer contains the application logic that orchestrates
/// domain services and coordinates with infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod interaction;
pub mod read_models;
pub mod use_cases;
