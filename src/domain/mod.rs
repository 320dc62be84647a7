pub mod deck_config;
pub mod error;

// Parsed rows and the derived catalog
pub mod catalog;
pub mod csv;
