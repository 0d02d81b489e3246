//! Decode-once codec for the hook's input and output channels.
//!
//! - Input => `JobRequest` (bounded read, strict schema, no panics)
//! - `Reply` => one JSON document, newline-terminated

use std::io::{Read, Write};

use esub_core::{
    error::{Result, EsubError},
    protocol::{JobRequest, Reply},
};

/// Read the whole input channel, stopping one byte past `max_bytes` so an
/// oversized payload is detected without buffering all of it.
pub fn read_input<R: Read>(input: R, max_bytes: usize) -> Result<Vec<u8>> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    input
        .take(limit)
        .read_to_end(&mut buf)
        .map_err(|e| EsubError::Internal(format!("read input failed: {e}")))?;
    Ok(buf)
}

/// Decode one job request.
///
/// Stricter than the bare schema: a `user` that is empty or only whitespace
/// is refused as `MalformedInput`, even though the field is present.
pub fn decode_job(bytes: &[u8], max_bytes: usize) -> Result<JobRequest> {
    if bytes.len() > max_bytes {
        return Err(EsubError::PayloadTooLarge);
    }

    let job: JobRequest = serde_json::from_slice(bytes)
        .map_err(|e| EsubError::MalformedInput(format!("invalid job json: {e}")))?;

    if job.user.trim().is_empty() {
        return Err(EsubError::MalformedInput("user must not be empty".into()));
    }
    Ok(job)
}

pub fn encode_reply(reply: &Reply) -> Result<String> {
    serde_json::to_string(reply)
        .map_err(|e| EsubError::Internal(format!("encode reply failed: {e}")))
}

pub fn write_reply<W: Write>(mut output: W, reply: &Reply) -> Result<()> {
    let s = encode_reply(reply)?;
    writeln!(output, "{s}")
        .and_then(|_| output.flush())
        .map_err(|e| EsubError::Internal(format!("write reply failed: {e}")))
}
