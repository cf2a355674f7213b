//! Terminal front-end: stdin commands in, rendered conversation out.
mod app;
mod commands;
mod config;
mod effects;
mod render;

pub use app::run_app;
