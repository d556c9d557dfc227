//! Carbon-steel grade selector.
//!
//! The `data` module holds the pure filter and scoring engines; `state`,
//! `app` and `ui` are the egui front end built on top of them.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
