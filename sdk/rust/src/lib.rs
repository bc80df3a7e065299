//! Rust client for the ashes-vote HTTP API.

mod client;

pub use client::{SdkError, TeamCount, VoteClient, VoteRequest};
