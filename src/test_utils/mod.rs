//! Test helpers shared by unit tests and, behind the `test-util` feature, by
//! applications testing their own GELF wiring.

pub mod collecting_client;

pub use collecting_client::{ClientBehaviour, CollectingClient, SentMessage};
