// Infrastructure layer - External formats and adapters
pub mod config;
pub mod csv_codec;
pub mod flash;
pub mod sample_data;

