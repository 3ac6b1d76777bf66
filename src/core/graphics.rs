//! Kitty graphics protocol encoder.
//!
//! Image payloads are base64 text. They are sent as direct transmissions split into
//! framed chunks of at most [CHUNK_SIZE] characters:
//!
//! ```text
//! ESC _G a=T,f=100,t=d,q=2,m=1 ; <chunk 0> ESC \
//! ESC _G m=1 ; <chunk 1> ESC \
//! ESC _G m=0 ; <last chunk> ESC \
//! ```
//!
//! Only the first chunk carries placement metadata. Placements outlive normal cell
//! writes, so [DELETE_ALL] must be sent before a new placement and before the pane
//! stops showing an image.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crossterm::{cursor::MoveTo, queue};

use std::io;

/// Base64 characters per chunk.
pub const CHUNK_SIZE: usize = 4096;

/// Row offset of the image from the preview pane's origin, reserved for the details
/// header. Added to the 0-based pane row to get the 1-based CUP row.
pub const HEADER_ROWS: u16 = 7;

/// Column offset of the image, applied like [HEADER_ROWS].
pub const HEADER_COLS: u16 = 2;

/// Deletes every visible placement.
pub const DELETE_ALL: &str = "\x1b_Ga=d,q=2\x1b\\";

const APC_START: &[u8] = b"\x1b_G";
const APC_END: &[u8] = b"\x1b\\";

/// Transmit and display, PNG, direct medium, errors suppressed.
const FIRST_CHUNK_KEYS: &[u8] = b"a=T,f=100,t=d,q=2,";

/// Encodes raw image bytes into the base64 payload stored in the preview cache.
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Splits `payload` into framed protocol chunks.
///
/// An empty payload yields no chunks.
pub fn frame_chunks(payload: &str) -> Vec<Vec<u8>> {
    let pieces: Vec<&[u8]> = payload.as_bytes().chunks(CHUNK_SIZE).collect();
    let last = pieces.len().saturating_sub(1);

    pieces
        .iter()
        .enumerate()
        .map(|(idx, piece)| {
            let mut frame = Vec::with_capacity(piece.len() + 32);
            frame.extend_from_slice(APC_START);
            if idx == 0 {
                frame.extend_from_slice(FIRST_CHUNK_KEYS);
            }
            frame.extend_from_slice(if idx == last { b"m=0;" } else { b"m=1;" });
            frame.extend_from_slice(piece);
            frame.extend_from_slice(APC_END);
            frame
        })
        .collect()
}

/// Builds the byte stream that places `payload` below the header of the pane whose
/// 0-based origin is (`pane_row`, `pane_col`).
///
/// The cursor lands on CUP `pane_row + HEADER_ROWS ; pane_col + HEADER_COLS`.
pub fn encode_at(payload: &str, pane_row: u16, pane_col: u16) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / CHUNK_SIZE * 16 + 64);
    queue!(
        out,
        MoveTo(
            pane_col.saturating_add(HEADER_COLS - 1),
            pane_row.saturating_add(HEADER_ROWS - 1)
        )
    )?;
    for frame in frame_chunks(payload) {
        out.extend_from_slice(&frame);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn split_frames(stream: &[u8]) -> Vec<&[u8]> {
        let mut frames = Vec::new();
        let mut rest = stream;
        while let Some(start) = rest.windows(APC_START.len()).position(|w| w == APC_START) {
            let after = &rest[start + APC_START.len()..];
            let end = after
                .windows(APC_END.len())
                .position(|w| w == APC_END)
                .unwrap_or(after.len());
            frames.push(&after[..end]);
            rest = &after[(end + APC_END.len()).min(after.len())..];
        }
        frames
    }

    fn body(frame: &[u8]) -> (&[u8], &[u8]) {
        let sep = frame.iter().position(|b| *b == b';').unwrap_or(frame.len());
        (&frame[..sep], &frame[(sep + 1).min(frame.len())..])
    }

    #[test]
    fn chunk_count_and_terminal_markers() {
        for len in [1usize, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, 3 * CHUNK_SIZE + 17] {
            let payload = "A".repeat(len);
            let chunks = frame_chunks(&payload);
            assert_eq!(chunks.len(), len.div_ceil(CHUNK_SIZE), "len {len}");

            for (i, chunk) in chunks.iter().enumerate() {
                let frames = split_frames(chunk);
                assert_eq!(frames.len(), 1);
                let (keys, data) = body(frames[0]);
                assert!(data.len() <= CHUNK_SIZE);

                let keys = std::str::from_utf8(keys).unwrap_or_default();
                if i == 0 {
                    assert!(keys.starts_with("a=T,f=100,t=d,q=2,"));
                } else {
                    assert!(!keys.contains("a=T"));
                }
                if i + 1 == chunks.len() {
                    assert!(keys.ends_with("m=0"));
                } else {
                    assert!(keys.ends_with("m=1"));
                }
            }
        }
    }

    #[test]
    fn empty_payload_has_no_chunks() {
        assert!(frame_chunks("").is_empty());
    }

    #[test]
    fn decoded_chunks_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = rand::rng();
        let raw: Vec<u8> = (0..20_000).map(|_| rng.random::<u8>()).collect();
        let payload = encode_payload(&raw);

        let stream = encode_at(&payload, 3, 40)?;
        let mut joined = Vec::new();
        for frame in split_frames(&stream) {
            joined.extend_from_slice(body(frame).1);
        }
        assert_eq!(joined, payload.as_bytes());
        assert_eq!(STANDARD.decode(&joined)?, raw);
        Ok(())
    }

    #[test]
    fn placement_starts_with_cursor_move() -> Result<(), Box<dyn std::error::Error>> {
        let stream = encode_at("QUJD", 1, 50)?;
        assert!(stream.starts_with(b"\x1b[8;52H"));

        let origin = encode_at("QUJD", 0, 0)?;
        assert!(origin.starts_with(b"\x1b[7;2H"));
        Ok(())
    }

    #[test]
    fn delete_sequence_shape() {
        assert!(DELETE_ALL.starts_with("\x1b_G"));
        assert!(DELETE_ALL.contains("a=d"));
        assert!(DELETE_ALL.ends_with("\x1b\\"));
    }
}
