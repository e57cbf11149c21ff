#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod database;
pub mod json;
pub mod log;
pub mod memory;
