pub mod demos;
pub mod knowledge;
pub mod profiles;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
