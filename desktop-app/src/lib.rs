pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod grid;
pub mod gui;
pub mod logging;
pub mod notice;

pub use client::Client;
pub use error::Error;
