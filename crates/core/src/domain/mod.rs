pub mod client;
pub mod menu;
pub mod quote;
