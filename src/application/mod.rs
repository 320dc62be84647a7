pub mod use_cases;

pub use use_cases::catalog_store::{CatalogStore, SharedCatalog};
pub use use_cases::deck_loader::{DeckLoader, LoadState};
pub use use_cases::deck_view::{CardView, DeckPresenter, DeckView, DetailView, ListEntry};
