#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod error;
mod fleet;
mod grid;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
mod resolver;
mod score;
#[cfg(feature = "std")]
mod session;
mod ship;
mod state;
#[cfg(feature = "std")]
pub mod ui;

pub use config::*;
pub use error::*;
pub use fleet::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use resolver::*;
pub use score::*;
#[cfg(feature = "std")]
pub use session::*;
pub use ship::*;
pub use state::*;
