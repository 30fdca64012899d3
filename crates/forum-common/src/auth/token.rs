//! Session token generation

use base64::Engine;
use rand::{rngs::OsRng, RngCore};

use crate::error::AppError;

/// Random bytes per token (256 bits)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Create a new opaque session token, URL-safe base64 without padding
///
/// # Errors
/// Returns an internal error if the OS random source fails
pub fn generate_session_token() -> Result<String, AppError> {
    let mut bytes = [0u8; SESSION_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to generate session token: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
}
