pub mod relay;

pub use reqwest::Client;
