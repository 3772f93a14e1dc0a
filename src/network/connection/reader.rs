//! Inbound line reader.
//!
//! Drives [`LineCodec`] by hand instead of through `FramedRead`, which
//! treats every decode error as terminal. Here an overlong line is reported
//! and reading carries on.

use bytes::BytesMut;
use chatd_proto::{LineCodec, ProtocolError};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::codec::Decoder;

const READ_CHUNK: usize = 4096;

pub(super) struct LineReader<R> {
    inner: R,
    codec: LineCodec,
    buf: BytesMut,
    eof: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub(super) fn new(inner: R, codec: LineCodec) -> Self {
        Self {
            inner,
            codec,
            buf: BytesMut::with_capacity(READ_CHUNK),
            eof: false,
        }
    }

    /// Next line, a framing error, or `None` at end of stream.
    ///
    /// Cancel safe: the only await point is a single `read_buf`.
    pub(super) async fn next_line(&mut self) -> Option<Result<String, ProtocolError>> {
        loop {
            if self.eof {
                return self.codec.decode_eof(&mut self.buf).transpose();
            }
            match self.codec.decode(&mut self.buf) {
                Ok(Some(line)) => return Some(Ok(line)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }

            self.buf.reserve(READ_CHUNK);
            match self.inner.read_buf(&mut self.buf).await {
                Ok(0) => self.eof = true,
                Ok(_) => {}
                Err(e) => return Some(Err(ProtocolError::Io(e))),
            }
        }
    }
}
