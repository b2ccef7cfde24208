mod command;
mod error;
pub mod password;
mod repository;
mod token;

pub use command::*;
pub use error::*;
pub use repository::*;
pub use token::*;
