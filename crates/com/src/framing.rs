use crate::ComError;

pub const MAX_MESSAGE_SIZE: usize = 64 * 1024 * 1024; // 64 MB

/// Largest HTTP request head the page server reads.
pub const MAX_REQUEST_HEAD: usize = 8 * 1024;

/// Rejects payloads larger than `MAX_MESSAGE_SIZE`.
pub fn check_message_size(len: usize) -> Result<(), ComError> {
    if len > MAX_MESSAGE_SIZE {
        return Err(ComError::MessageTooLarge(len));
    }
    Ok(())
}
