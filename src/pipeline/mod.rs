pub mod format;
pub mod load;
pub mod parse;
