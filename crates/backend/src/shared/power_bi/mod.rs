pub mod auth;
pub mod client;
pub mod dto;

pub use auth::AzureAdTokenProvider;
pub use client::PowerBiApiClient;
