//! Core note model: document store, session state, text utilities and configuration

pub mod capability;
pub mod config;
pub mod cursor;
pub mod edit;
pub mod error;
pub mod file_io;
pub mod search;
pub mod session;
pub mod store;
