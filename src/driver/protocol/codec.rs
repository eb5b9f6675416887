use super::command::PathRequest;
use super::error::DriverError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum size of a single buffered response (16 MB)
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Frame delimiter appended after every encoded value.
pub const FRAME_DELIMITER: u8 = b'\n';

pub fn encode_request(req: &PathRequest) -> Result<Vec<u8>, DriverError> {
    encode_message(req)
}

pub fn encode_message<T: Serialize>(msg: &T) -> Result<Vec<u8>, DriverError> {
    let mut buf = serde_json::to_vec(msg)
        .map_err(|e| DriverError::ProtocolError(format!("Serialization failed: {}", e)))?;

    if buf.len() > MAX_MESSAGE_SIZE {
        return Err(DriverError::MessageTooLarge);
    }

    buf.push(FRAME_DELIMITER);
    Ok(buf)
}

/// Tries to pull one complete JSON value off the front of `buf`.
///
/// Returns `Ok(None)` when the buffer holds only whitespace or a value that
/// is still incomplete; the caller should read more bytes and retry. On
/// success the consumed bytes are drained, leaving any following data in
/// place for the next call.
pub fn decode_frame<T: DeserializeOwned>(buf: &mut Vec<u8>) -> Result<Option<T>, DriverError> {
    let mut stream = serde_json::Deserializer::from_slice(&buf[..]).into_iter::<T>();
    match stream.next() {
        Some(Ok(value)) => {
            let consumed = stream.byte_offset();
            buf.drain(..consumed);
            Ok(Some(value))
        }
        Some(Err(e)) if e.is_eof() => {
            if buf.len() > MAX_MESSAGE_SIZE {
                return Err(DriverError::MessageTooLarge);
            }
            Ok(None)
        }
        Some(Err(e)) => Err(DriverError::ProtocolError(format!(
            "Deserialization failed: {}",
            e
        ))),
        None => {
            buf.clear();
            Ok(None)
        }
    }
}
