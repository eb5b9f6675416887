//! Wire protocol definitions for the path server
//!
//! Requests and responses are JSON objects, one per line, over a raw TCP
//! stream. There is no handshake and no length prefix.

pub mod codec;
pub mod command;
pub mod error;
pub mod response;

pub use codec::{decode_frame, encode_message, encode_request, FRAME_DELIMITER, MAX_MESSAGE_SIZE};
pub use command::PathRequest;
pub use error::DriverError;
pub use response::{ErrorResponse, PathResponse, ServerReply};
