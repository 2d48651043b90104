#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod config;
pub mod data;
pub mod paginator;
pub mod storage;
pub mod ui;
pub mod view;
pub mod youtube;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
