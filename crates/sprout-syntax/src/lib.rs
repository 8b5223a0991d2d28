pub mod error;
pub mod line;
pub mod stmt;
pub mod token;
pub mod value;

pub use error::*;
pub use line::*;
pub use stmt::*;
pub use token::*;
pub use value::*;
