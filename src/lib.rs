// Library exports for the binary, integration tests and external use

pub mod api;
pub mod app_data;
pub mod audit;
pub mod cli;
pub mod config;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;

pub use app_data::AppData;

#[cfg(test)]
pub mod test {
    pub mod utils;
}
