// Presentation layer - HTTP handlers, routing and page rendering
pub mod app_state;
pub mod handlers;
pub mod pages;
pub mod router;
