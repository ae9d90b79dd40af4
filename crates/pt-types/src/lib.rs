pub mod errors;
pub mod objective;

pub use errors::*;
pub use objective::*;
