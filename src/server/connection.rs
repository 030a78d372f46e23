//! Connection handling
//!
//! Manages individual client connections, decoding RESP commands
//! and sending responses.

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::protocol::{Frame, FrameError, RespEncoder, RespParser, RespValue};
use bytes::BytesMut;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Connection handler
///
/// Generic over the stream so it can run on a `TcpStream` or an in-memory
/// pipe in tests.
pub struct Connection<S> {
    /// Client stream
    stream: S,

    /// Read buffer
    read_buffer: BytesMut,

    /// Write buffer
    write_buffer: BytesMut,

    /// Close the connection after this long without client bytes
    idle_timeout: Option<Duration>,

    /// Maximum number of buffered bytes for one pending frame
    max_frame_size: Option<usize>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new connection handler
    pub fn new(stream: S, config: &ServerConfig) -> Self {
        Connection {
            stream,
            read_buffer: BytesMut::with_capacity(config.read_buffer_size),
            write_buffer: BytesMut::with_capacity(config.read_buffer_size),
            idle_timeout: config.idle_timeout(),
            max_frame_size: config.frame_limit(),
        }
    }

    /// Handle the connection
    ///
    /// Decodes one frame, dispatches it, and writes the reply before looking
    /// at the next frame. Returns Ok(()) when the client disconnects cleanly
    /// between frames. A framing error is reported to the client, then ends
    /// the connection.
    pub async fn handle(&mut self, dispatcher: &Dispatcher) -> Result<()> {
        loop {
            let frame = match self.read_frame().await {
                Ok(Some(frame)) => frame,
                Ok(None) => return Ok(()),
                Err(Error::Frame(e)) => {
                    warn!("Protocol error: {}", e);
                    let reply = RespValue::error(format!("ERR Protocol error: {}", e));
                    if let Err(write_err) = self.send_response(&reply).await {
                        debug!("Could not report protocol error: {}", write_err);
                    }
                    return Err(Error::Frame(e));
                }
                Err(e) => return Err(e),
            };

            debug!("Parsed command: {}", frame);

            let response = dispatcher.dispatch(&frame);

            debug!("Response: {}", response);

            self.send_response(&response).await?;
        }
    }

    /// Read one complete frame
    ///
    /// Returns Ok(None) on a clean end of stream (no partial frame pending).
    pub async fn read_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            if let Some(frame) = RespParser::parse(&mut self.read_buffer)? {
                return Ok(Some(frame));
            }

            if let Some(limit) = self.max_frame_size {
                if self.read_buffer.len() > limit {
                    return Err(FrameError::TooLarge(limit).into());
                }
            }

            let n = self.fill_buffer().await?;

            // Connection closed
            if n == 0 {
                if self.read_buffer.is_empty() {
                    return Ok(None);
                } else {
                    return Err(Error::ConnectionReset);
                }
            }

            debug!("Read {} bytes", n);
        }
    }

    /// Read more bytes from the socket, honouring the idle timeout
    async fn fill_buffer(&mut self) -> Result<usize> {
        let idle_timeout = self.idle_timeout;
        let read = self.stream.read_buf(&mut self.read_buffer);

        match idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, read).await {
                Ok(result) => Ok(result?),
                Err(_) => Err(Error::IdleTimeout(limit)),
            },
            None => Ok(read.await?),
        }
    }

    /// Send a response to the client
    async fn send_response(&mut self, response: &RespValue) -> Result<()> {
        // Encode the response
        self.write_buffer.clear();
        RespEncoder::encode_to(&mut self.write_buffer, response);

        // Write to the socket
        self.stream.write_all(&self.write_buffer).await?;
        self.stream.flush().await?;

        Ok(())
    }
}
