//! RESP2 frame decoder and reply encoder
//!
//! Decodes client requests (arrays of bulk strings) from a byte buffer and
//! encodes RespValue replies back to bytes

use super::types::{Frame, FrameError, RespValue};
use bytes::{BufMut, Bytes, BytesMut};
use std::ops::Range;

const CRLF: &[u8] = b"\r\n";

/// RESP2 request parser
pub struct RespParser;

impl RespParser {
    /// Parse one command frame from the front of a buffer
    ///
    /// Returns Ok(Some(frame)) and consumes its bytes if a whole frame is
    /// buffered, Ok(None) without consuming anything if more data is needed,
    /// Err(e) if the bytes can never form a valid frame.
    pub fn parse(buf: &mut BytesMut) -> Result<Option<Frame>, FrameError> {
        let mut pos = 0;

        let count = match Self::read_length(&buf[..], &mut pos, b'*', "array")? {
            Some(count) => count,
            None => return Ok(None),
        };

        // Locate every argument before consuming anything
        let mut ranges: Vec<Range<usize>> = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let len = match Self::read_length(&buf[..], &mut pos, b'$', "bulk string")? {
                Some(len) => len,
                None => return Ok(None),
            };

            let end = pos.saturating_add(len);
            if buf.len() < end.saturating_add(CRLF.len()) {
                return Ok(None);
            }
            if &buf[end..end + CRLF.len()] != CRLF {
                return Err(FrameError::MissingCrlf);
            }

            ranges.push(pos..end);
            pos = end + CRLF.len();
        }

        let data = buf.split_to(pos).freeze();
        let args = ranges.into_iter().map(|range| data.slice(range)).collect();

        Ok(Some(Frame::new(args)))
    }

    /// Read a `<marker><length>\r\n` line starting at `pos`
    fn read_length(
        buf: &[u8],
        pos: &mut usize,
        marker: u8,
        what: &'static str,
    ) -> Result<Option<usize>, FrameError> {
        let found = match buf.get(*pos) {
            Some(&byte) => byte,
            None => return Ok(None),
        };
        if found != marker {
            return Err(FrameError::UnexpectedMarker {
                expected: char::from(marker),
                found: char::from(found),
            });
        }

        let line = match Self::peek_line(&buf[*pos..]) {
            Some(line) => line,
            None => return Ok(None),
        };

        let digits = std::str::from_utf8(&line[1..])
            .map_err(|_| FrameError::InvalidLength(what))?;
        let len = digits
            .parse::<i64>()
            .map_err(|_| FrameError::InvalidLength(what))?;
        if len < 0 {
            return Err(FrameError::NegativeLength(what));
        }
        let len = usize::try_from(len).map_err(|_| FrameError::InvalidLength(what))?;

        *pos += line.len() + CRLF.len();
        Ok(Some(len))
    }

    /// Peek a line from buffer without advancing (returns line without CRLF)
    fn peek_line(buf: &[u8]) -> Option<&[u8]> {
        buf.windows(CRLF.len())
            .position(|window| window == CRLF)
            .map(|i| &buf[..i])
    }
}

/// RESP2 Encoder
pub struct RespEncoder;

impl RespEncoder {
    /// Encode a RESP value to bytes
    pub fn encode(value: &RespValue) -> Bytes {
        let mut buf = BytesMut::new();
        Self::encode_to(&mut buf, value);
        buf.freeze()
    }

    /// Encode a RESP value into an existing buffer
    pub fn encode_to(buf: &mut BytesMut, value: &RespValue) {
        match value {
            RespValue::SimpleString(s) => {
                buf.put_u8(b'+');
                buf.put_slice(s.as_bytes());
                buf.put_slice(CRLF);
            }
            RespValue::Error(e) => {
                buf.put_u8(b'-');
                buf.put_slice(e.as_bytes());
                buf.put_slice(CRLF);
            }
            RespValue::Integer(i) => {
                buf.put_u8(b':');
                buf.put_slice(i.to_string().as_bytes());
                buf.put_slice(CRLF);
            }
            RespValue::BulkString(bytes) => {
                buf.put_u8(b'$');
                buf.put_slice(bytes.len().to_string().as_bytes());
                buf.put_slice(CRLF);
                buf.put_slice(bytes);
                buf.put_slice(CRLF);
            }
            RespValue::Null => {
                buf.put_slice(b"$-1\r\n");
            }
            RespValue::Array(arr) => {
                buf.put_u8(b'*');
                buf.put_slice(arr.len().to_string().as_bytes());
                buf.put_slice(CRLF);
                for elem in arr {
                    Self::encode_to(buf, elem);
                }
            }
        }
    }
}

/// Encode a frame as a RESP array of bulk strings (client side)
pub fn encode_frame(frame: &Frame) -> Bytes {
    let mut buf = BytesMut::new();
    let parts = frame.name().into_iter().chain(frame.args());
    buf.put_u8(b'*');
    buf.put_slice(frame.len().to_string().as_bytes());
    buf.put_slice(CRLF);
    for part in parts {
        buf.put_u8(b'$');
        buf.put_slice(part.len().to_string().as_bytes());
        buf.put_slice(CRLF);
        buf.put_slice(part);
        buf.put_slice(CRLF);
    }
    buf.freeze()
}
