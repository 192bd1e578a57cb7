pub mod enums;
pub mod resin;
pub mod waste_log;

pub use enums::*;
pub use resin::*;
pub use waste_log::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
