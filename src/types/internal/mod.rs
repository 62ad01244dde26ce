// Internal types - flow between API, service and store layers, never serialized to clients
pub mod audit;
pub mod auth;
pub mod context;
