pub mod error;
pub mod input_reader;
