pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod presenter;
pub mod ui;
pub mod view_models;

pub use app::QuizApp;
