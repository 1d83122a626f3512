//! HTTP request handlers.

pub mod city_handler;

pub use city_handler::city_routes;
