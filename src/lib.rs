pub mod alias;
pub mod builtin;
pub mod config;
pub mod error;
pub mod execute;
pub mod history;
pub mod interp;
pub mod jobs;
pub mod pest_ext;
pub mod prelude;
pub mod prompt;
pub mod script;
pub mod shellenv;
pub mod utils;
