pub mod aggregate;

pub use aggregate::{FavoriteSet, FavoriteToggle, FavoriteToggleRequest, FavoriteToggleResponse};
