pub mod catalog_store;
pub mod deck_loader;
pub mod deck_view;
