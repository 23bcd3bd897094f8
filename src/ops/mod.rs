pub mod edit;
pub mod filter;
pub mod rail;
