//! Length-prefixed frame codec
//!
//! One frame = 4-byte big-endian length + that many payload bytes. The
//! prefix is read as a signed 32-bit integer so a peer that writes signed
//! lengths interoperates; a non-positive length is a transient condition to
//! skip, not a reason to drop the peer.

use crate::error::{BridgeError, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Encode one payload into a framed byte vector
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Read exactly one frame, skipping non-positive length prefixes
///
/// Blocks the calling task until a full frame arrives. Any I/O failure and
/// any length above `max_len` is fatal for this connection.
pub async fn read_frame<R>(reader: &mut R, max_len: usize) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    loop {
        let mut len_bytes = [0u8; 4];
        if let Err(e) = reader.read_exact(&mut len_bytes).await {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                return Err(BridgeError::ConnectionClosed);
            }
            return Err(e.into());
        }
        let len = i32::from_be_bytes(len_bytes);
        if len <= 0 {
            continue;
        }
        let len = len as usize;
        if len > max_len {
            return Err(BridgeError::FrameTooLarge { got: len, max: max_len });
        }
        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload).await?;
        return Ok(payload);
    }
}

/// Write one framed payload and flush
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(&(payload.len() as u32).to_be_bytes())
        .await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 64 * 1024 * 1024;

    #[tokio::test]
    async fn frame_round_trip() {
        let payload = b"hello spire".to_vec();
        let frame = encode_frame(&payload);
        let mut cursor: &[u8] = &frame;
        let decoded = read_frame(&mut cursor, MAX).await.unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn write_then_read() {
        let mut buf = Vec::new();
        write_frame(&mut buf, b"abc").await.unwrap();
        write_frame(&mut buf, b"defg").await.unwrap();
        let mut cursor: &[u8] = &buf;
        assert_eq!(read_frame(&mut cursor, MAX).await.unwrap(), b"abc");
        assert_eq!(read_frame(&mut cursor, MAX).await.unwrap(), b"defg");
    }

    #[tokio::test]
    async fn zero_length_prefix_is_skipped() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&encode_frame(b"after"));
        let mut cursor: &[u8] = &buf;
        assert_eq!(read_frame(&mut cursor, MAX).await.unwrap(), b"after");
    }

    #[tokio::test]
    async fn negative_length_prefix_is_skipped() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-7i32).to_be_bytes());
        buf.extend_from_slice(&encode_frame(b"ok"));
        let mut cursor: &[u8] = &buf;
        assert_eq!(read_frame(&mut cursor, MAX).await.unwrap(), b"ok");
    }

    #[tokio::test]
    async fn oversized_frame_is_fatal() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1024i32.to_be_bytes());
        buf.extend_from_slice(&[0u8; 1024]);
        let mut cursor: &[u8] = &buf;
        let err = read_frame(&mut cursor, 16).await.unwrap_err();
        assert!(matches!(err, BridgeError::FrameTooLarge { got: 1024, max: 16 }));
    }

    #[tokio::test]
    async fn clean_close_between_frames() {
        let mut cursor: &[u8] = &[];
        let err = read_frame(&mut cursor, MAX).await.unwrap_err();
        assert!(matches!(err, BridgeError::ConnectionClosed));
    }

    #[tokio::test]
    async fn truncated_stream_is_an_io_error() {
        let frame = encode_frame(b"full payload");
        let mut cursor: &[u8] = &frame[..6];
        assert!(read_frame(&mut cursor, MAX).await.is_err());
    }
}
