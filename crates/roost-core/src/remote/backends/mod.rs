mod api;
mod gh;
mod rest;

pub use api::ApiProvider;
pub use gh::GhCliProvider;
pub use rest::RestClient;
