pub mod config;
pub mod dashboard;
pub mod ui;
pub mod view;
