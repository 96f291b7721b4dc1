pub mod core;
pub mod calc;
pub mod models;
pub mod portal;
pub mod stores;
pub mod utils;
pub mod validation;

pub use crate::calc::grade::{aggregate, grade_for};
pub use crate::core::error::{PortalError, ValidationError};
pub use crate::portal::PortalStore;
