// Application layer - Use cases and shared state
pub mod dataset_store;
pub mod panel_service;
pub mod upload_service;
