pub mod compatibility;
pub mod constants;
pub mod error;
pub mod interface;
pub mod keeper;
pub mod msg;
pub mod query;
pub mod state;

#[cfg(test)]
mod tests;
