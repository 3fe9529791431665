pub mod common;
pub use common::*;

pub mod command;
pub mod expression;

pub use command::parse_command;
pub use expression::parse_expression;
