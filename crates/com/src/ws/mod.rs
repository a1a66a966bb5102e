mod client;

pub use client::{Reply, StreamClient};
