pub mod casefold;
pub mod unicode;
