#![no_std]

extern crate alloc;

pub use config::*;
pub use error::*;
pub use level::*;
pub use phase::*;
pub use scoring::*;
pub use session::*;
pub use snapshot::*;
pub use timer::*;
pub use types::*;
pub use validation::*;

mod config;
mod error;
mod level;
mod phase;
mod scoring;
mod session;
mod snapshot;
mod timer;
mod types;
mod validation;
