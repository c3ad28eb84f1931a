pub mod account;
pub mod admin;
pub mod campaigns;
pub mod catalog;
pub mod components;
pub mod dashboard;
pub mod homepage;
pub mod layout;
pub mod learn;
pub mod studio;
pub mod wishlist;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
