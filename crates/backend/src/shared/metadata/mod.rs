pub mod client;

pub use client::MetadataApiClient;
