#![allow(dead_code)]

pub mod threaded_client;

pub use threaded_client::{Delivery, ThreadedClient};
