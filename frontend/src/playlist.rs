pub mod api;
pub mod cache;
pub mod components;
pub mod controller;
pub mod feed;
pub mod state;
