// Domain layer - Core data models
pub mod dataset;
pub mod figure;
