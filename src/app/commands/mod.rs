pub mod generate;
pub mod parse;
pub mod preview;
