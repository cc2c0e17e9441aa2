pub mod client;
pub mod description;
