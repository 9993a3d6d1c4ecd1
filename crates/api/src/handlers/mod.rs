pub mod admin;
pub mod auction;
pub mod auth;
pub mod candidates;
pub mod ratings;
pub mod teams;
