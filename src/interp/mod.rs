pub mod expand;
pub mod parse;
pub mod token;
