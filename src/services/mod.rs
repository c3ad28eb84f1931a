pub mod auth;
pub mod campaign;
pub mod resource;
pub mod wishlist;
