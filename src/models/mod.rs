pub mod analysis;
pub mod disease;
pub mod enums;
pub mod user;

pub use analysis::*;
pub use disease::*;
pub use enums::*;
pub use user::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
