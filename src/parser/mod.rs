pub mod username_parser;

pub use username_parser::{Username, UsernameParser};
