//! Path server client
//!
//! Holds a single connection and issues one query at a time: every call to
//! [`PathClient::find_shortest_path`] writes a request and waits for its
//! response before returning, so there is never more than one request in
//! flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use pathbench::driver::PathClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = PathClient::connect("localhost:8080").await?;
//!
//!     let outcome = client.find_shortest_path("A", "B").await?;
//!     println!("{:?} in {:?}", outcome.response.path, outcome.round_trip);
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

use super::protocol::{
    decode_frame, encode_request, DriverError, PathRequest, PathResponse, ServerReply,
};

/// Initial capacity of the response buffer
const READ_BUFFER_SIZE: usize = 4096;

/// Result of a single query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub request: PathRequest,
    pub response: PathResponse,
    /// Wall-clock time from just before the request write until the response
    /// was fully decoded
    pub round_trip: Duration,
}

/// Client for a shortest-path server.
pub struct PathClient<S = TcpStream> {
    stream: S,
    read_buf: Vec<u8>,
    peer: String,
}

impl PathClient<TcpStream> {
    /// Resolve `addr` (`host:port`) and open a connection to the first
    /// address it yields.
    pub async fn connect(addr: &str) -> Result<Self, DriverError> {
        let target = lookup_host(addr)
            .await
            .map_err(|e| DriverError::ResolveError(format!("Failed to resolve {}: {}", addr, e)))?
            .next()
            .ok_or_else(|| DriverError::ResolveError(format!("No addresses found for {}", addr)))?;

        let stream = TcpStream::connect(target).await.map_err(|e| {
            DriverError::ConnectionError(format!("Failed to connect to {}: {}", addr, e))
        })?;

        stream.set_nodelay(true).map_err(|e| {
            DriverError::ConnectionError(format!("Failed to set TCP_NODELAY: {}", e))
        })?;

        tracing::info!("Connected to {} ({})", addr, target);
        Ok(Self::from_stream(stream, addr))
    }
}

impl<S> PathClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already established stream.
    pub fn from_stream(stream: S, peer: &str) -> Self {
        Self {
            stream,
            read_buf: Vec::with_capacity(READ_BUFFER_SIZE),
            peer: peer.to_string(),
        }
    }

    /// Ask the server for the shortest path between two nodes.
    ///
    /// The clock starts right before the request is written and stops once a
    /// complete response has been decoded. An error payload from the server
    /// is returned as [`DriverError::ServerError`].
    pub async fn find_shortest_path(
        &mut self,
        origin: &str,
        destination: &str,
    ) -> Result<QueryOutcome, DriverError> {
        let request = PathRequest::new(origin, destination);
        let data = encode_request(&request)?;

        let start = Instant::now();
        self.stream
            .write_all(&data)
            .await
            .map_err(|e| DriverError::ConnectionError(format!("Write failed: {}", e)))?;
        self.stream
            .flush()
            .await
            .map_err(|e| DriverError::ConnectionError(format!("Flush failed: {}", e)))?;

        let reply = self.read_reply().await?;
        let round_trip = start.elapsed();

        Ok(QueryOutcome {
            request,
            response: reply.into_path()?,
            round_trip,
        })
    }

    async fn read_reply(&mut self) -> Result<ServerReply, DriverError> {
        loop {
            if let Some(reply) = decode_frame(&mut self.read_buf)? {
                return Ok(reply);
            }

            let n = self
                .stream
                .read_buf(&mut self.read_buf)
                .await
                .map_err(|e| DriverError::ConnectionError(format!("Read failed: {}", e)))?;

            if n == 0 {
                let msg = if self.read_buf.is_empty() {
                    "Connection closed by server"
                } else {
                    "Connection closed in the middle of a response"
                };
                return Err(DriverError::ProtocolError(msg.to_string()));
            }
        }
    }

    /// Shut the connection down. Consumes the client so it can only happen once.
    pub async fn close(mut self) -> Result<(), DriverError> {
        self.stream
            .shutdown()
            .await
            .map_err(|e| DriverError::ConnectionError(format!("Close failed: {}", e)))?;
        tracing::debug!("Connection to {} closed", self.peer);
        Ok(())
    }
}
