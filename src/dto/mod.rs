pub mod auth;
pub mod cart;
pub mod checkout;
pub mod likes;
pub mod orders;
