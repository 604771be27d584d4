pub mod definition;
pub mod inputs;
pub mod parser;
pub mod template;
