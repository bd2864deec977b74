// Backend API (registry + domain check)
//
// `client` owns URL construction and transport mechanics; the endpoint
// groups live in sibling files as inherent methods on `BackendClient`.

pub mod check;
pub mod client;
pub mod models;
pub mod sites;

pub use client::BackendClient;
