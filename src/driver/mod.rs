//! Client driver for shortest-path servers
//!
//! # Protocol Overview
//!
//! - **Transport**: one plain TCP connection, no handshake
//! - **Request**: `{"ori": "<node>", "dest": "<node>"}` followed by `\n`
//! - **Response**: `{"path": [...], "calc-duration": <nanoseconds>}`, or
//!   `{"message": "..."}` when the server reports an error

pub mod client;
pub mod protocol;

pub use client::{PathClient, QueryOutcome};
pub use protocol::{DriverError, PathRequest, PathResponse, ServerReply};
