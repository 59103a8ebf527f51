mod client;
mod client_utils;
mod errors;
mod service;
mod types;

pub mod reactive_sdk_test;

pub use client::{Environment, ReactiveModeClient};
pub use errors::*;
pub use service::ContentService;
pub use types::*;
