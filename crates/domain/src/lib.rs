#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod carry_forward;
pub mod plates;
pub mod position;
pub mod warmup;

mod error;
mod exercise;
mod exercise_group;
mod name;
mod plan;
mod service;
mod set;
mod settings;
mod training;
mod workout;

pub use error::*;
pub use exercise::*;
pub use exercise_group::*;
pub use name::*;
pub use plan::*;
pub use plates::{DEFAULT_PLATE_CAP, PlateLoad, PlateTable};
pub use position::{Binding, Position, Slot, SlotID};
pub use service::*;
pub use set::*;
pub use settings::*;
pub use training::*;
pub use workout::*;
