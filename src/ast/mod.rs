pub mod expression;
pub mod statement;
pub mod value;

pub use expression::*;
pub use statement::*;
pub use value::*;
