mod client;

pub use client::SessionsClient;
