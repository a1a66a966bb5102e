//! Viewer transport: an HTTP server for the viewer page and a WebSocket server carrying
//! camera frames from the browser and annotated frames back.

pub mod error;
pub mod framing;
pub mod page;
pub mod stream;
pub mod ws;

pub use error::ComError;
pub use page::PageServer;
pub use stream::{StreamHandler, StreamServer};
pub use ws::{Reply, StreamClient};
