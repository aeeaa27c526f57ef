//! Message framing.
//!
//! Each message on the wire is `length(2, big-endian) tag(1) payload(N)`.
//! The payload length `N` is a static property of the tag; the length
//! prefix is read only to advance the cursor and kept for diagnostics.

use crate::dispatch::DispatchTable;
use crate::error::{FeedError, FeedResult};
use crate::header::be_u16;
use itch_core::MessageType;
use std::io::{ErrorKind, Read};
use tracing::trace;

/// Largest payload of any message type.
const MAX_PAYLOAD_LEN: usize = 64;

/// One framed message, borrowed from the framer's buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawMessage<'a> {
    /// Byte offset of the length prefix in the stream.
    pub offset: u64,
    /// Length prefix as found on the wire (not validated).
    pub declared_len: u16,
    pub msg_type: MessageType,
    pub payload: &'a [u8],
}

impl RawMessage<'_> {
    /// Wire tag byte.
    #[inline]
    pub fn tag(&self) -> u8 {
        self.msg_type.tag()
    }

    /// Total bytes this message occupied on the wire.
    #[inline]
    pub fn wire_len(&self) -> u64 {
        (2 + 1 + self.payload.len()) as u64
    }
}

/// Forward-only framer over a byte stream.
pub struct MessageFramer<R> {
    reader: R,
    /// Offset of the next unread byte.
    offset: u64,
    buf: [u8; MAX_PAYLOAD_LEN],
}

impl<R: Read> MessageFramer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            offset: 0,
            buf: [0; MAX_PAYLOAD_LEN],
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` at a clean end of stream (no bytes left where a
    /// length prefix would start). An unknown tag or a stream that ends
    /// mid-message is an error; the framer never guesses a length.
    pub fn next_message(&mut self, table: &DispatchTable) -> FeedResult<Option<RawMessage<'_>>> {
        let start = self.offset;

        let mut prefix = [0u8; 2];
        let n = read_fully(&mut self.reader, &mut prefix)?;
        if n == 0 {
            return Ok(None);
        }
        if n < prefix.len() {
            return Err(FeedError::Truncated {
                offset: start,
                expected: prefix.len(),
                available: n,
            });
        }
        let declared_len = be_u16(&prefix);

        let mut tag = [0u8; 1];
        if read_fully(&mut self.reader, &mut tag)? == 0 {
            return Err(FeedError::Truncated {
                offset: start,
                expected: 1,
                available: 0,
            });
        }
        let tag = tag[0];

        let msg_type = table
            .lookup(tag)
            .ok_or(FeedError::UnknownMessageType { tag, offset: start })?;

        let len = msg_type.payload_len();
        let got = read_fully(&mut self.reader, &mut self.buf[..len])?;
        if got < len {
            return Err(FeedError::Truncated {
                offset: start,
                expected: len,
                available: got,
            });
        }

        if usize::from(declared_len) != len + 1 {
            trace!(
                offset = start,
                %msg_type,
                declared_len,
                expected = len + 1,
                "Length prefix disagrees with message type"
            );
        }

        self.offset = start + 3 + len as u64;

        Ok(Some(RawMessage {
            offset: start,
            declared_len,
            msg_type,
            payload: &self.buf[..len],
        }))
    }
}

/// Fill `buf` as far as the stream allows, returning the bytes read.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
