pub mod builder;
pub mod dto;

pub use builder::build_catalog;
pub use dto::{CatalogRequest, CatalogResponse, CatalogState, CatalogView};
