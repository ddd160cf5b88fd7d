//! Developer portfolios rendered from public GitHub profiles.

pub mod catalog;
pub mod cli;
pub mod contact;
pub mod date;
pub mod error;
pub mod github;
pub mod language;
pub mod models;
pub mod pages;
pub mod readme;
pub mod server;
pub mod service;
pub mod types;
pub mod username;
pub mod view;
