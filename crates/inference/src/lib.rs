pub mod error;
pub mod hand;
pub mod inference;

pub use error::InferError;
pub use hand::*;
pub use inference::Inference;
