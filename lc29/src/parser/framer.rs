use alloc::vec::Vec;

use crate::{
    constants::{MAX_FRAME_LEN, SENTENCE_START, TERMINATOR},
    error::TransportError,
};

/// Reassembles `$...\r\n` frames from an arbitrary byte stream.
///
/// Bytes before a `$` are dropped. A frame that grows past the configured
/// limit without a terminator is discarded and reported as
/// [`TransportError::Overflow`].
pub struct SentenceFramer {
    buf: Vec<u8>,
    max_len: usize,
}

impl Default for SentenceFramer {
    fn default() -> Self {
        Self::new(MAX_FRAME_LEN)
    }
}

impl SentenceFramer {
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: Vec::with_capacity(max_len),
            max_len,
        }
    }

    pub fn is_buffer_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Appends `new_data` and returns an iterator over the complete frames now buffered
    pub fn consume<'a>(&'a mut self, new_data: &[u8]) -> FramerIter<'a> {
        self.buf.extend_from_slice(new_data);
        FramerIter { framer: self }
    }

    fn next_frame(&mut self) -> Option<Result<Vec<u8>, TransportError>> {
        loop {
            let Some(start) = self.buf.iter().position(|&b| b == SENTENCE_START) else {
                if !self.buf.is_empty() {
                    log::trace!("dropping {} bytes of line noise", self.buf.len());
                }
                self.buf.clear();
                return None;
            };
            if start > 0 {
                log::trace!("dropping {} bytes before '$'", start);
                self.buf.drain(..start);
            }

            let Some(end) = self.buf.windows(2).position(|w| w == TERMINATOR) else {
                if self.buf.len() > self.max_len {
                    self.resync_or_clear();
                    return Some(Err(TransportError::Overflow));
                }
                return None;
            };

            // A '$' inside the frame means the previous one was cut short
            if let Some(restart) = self.buf[1..end].iter().position(|&b| b == SENTENCE_START) {
                log::debug!("truncated frame of {} bytes dropped", restart + 1);
                self.buf.drain(..=restart);
                continue;
            }

            let frame: Vec<u8> = self.buf.drain(..end + TERMINATOR.len()).collect();
            if frame.len() > self.max_len {
                return Some(Err(TransportError::Overflow));
            }
            return Some(Ok(frame));
        }
    }

    /// Keeps the buffer from a later `$`, if any, so the next frame is not lost
    fn resync_or_clear(&mut self) {
        match self.buf[1..].iter().position(|&b| b == SENTENCE_START) {
            Some(pos) => {
                self.buf.drain(..=pos);
            },
            None => self.buf.clear(),
        }
    }
}

/// Iterator over frames produced by [`SentenceFramer::consume`]
pub struct FramerIter<'a> {
    framer: &'a mut SentenceFramer,
}

impl Iterator for FramerIter<'_> {
    type Item = Result<Vec<u8>, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.framer.next_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const FIX_RATE_ACK: &[u8] = b"$PAIR001,051,0*3F\r\n";
    const FIX_RATE_QUERY: &[u8] = b"$PAIR051,1000*13\r\n";

    fn frames(framer: &mut SentenceFramer, data: &[u8]) -> Vec<Vec<u8>> {
        framer.consume(data).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_consume_empty() {
        let mut framer = SentenceFramer::default();
        assert!(frames(&mut framer, &[]).is_empty());
        assert!(framer.is_buffer_empty());
    }

    #[test]
    fn test_consume_byte_by_byte() {
        let mut framer = SentenceFramer::default();
        for b in FIX_RATE_ACK.iter().take(FIX_RATE_ACK.len() - 1) {
            assert!(frames(&mut framer, &[*b]).is_empty());
            assert!(!framer.is_buffer_empty());
        }
        let last = FIX_RATE_ACK[FIX_RATE_ACK.len() - 1];
        assert_eq!(frames(&mut framer, &[last]), vec![FIX_RATE_ACK.to_vec()]);
        assert!(framer.is_buffer_empty());
    }

    #[test]
    fn test_consume_two_frames_in_one_go() {
        let mut framer = SentenceFramer::default();
        let mut data = FIX_RATE_ACK.to_vec();
        data.extend_from_slice(FIX_RATE_QUERY);
        assert_eq!(
            frames(&mut framer, &data),
            vec![FIX_RATE_ACK.to_vec(), FIX_RATE_QUERY.to_vec()]
        );
    }

    #[test]
    fn test_consume_drops_leading_noise() {
        let mut framer = SentenceFramer::default();
        let mut data = b"\x00\xffgarbage\r\n".to_vec();
        data.extend_from_slice(FIX_RATE_ACK);
        assert_eq!(frames(&mut framer, &data), vec![FIX_RATE_ACK.to_vec()]);
    }

    #[test]
    fn test_consume_noise_only_is_discarded() {
        let mut framer = SentenceFramer::default();
        assert!(frames(&mut framer, b"no frames here").is_empty());
        assert!(framer.is_buffer_empty());
    }

    #[test]
    fn test_consume_truncated_frame_is_skipped() {
        let mut framer = SentenceFramer::default();
        let mut data = b"$PAIR001,05".to_vec();
        data.extend_from_slice(FIX_RATE_QUERY);
        assert_eq!(frames(&mut framer, &data), vec![FIX_RATE_QUERY.to_vec()]);
    }

    #[test]
    fn test_consume_overflow() {
        let mut framer = SentenceFramer::new(16);
        let mut it = framer.consume(b"$AAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(matches!(it.next(), Some(Err(TransportError::Overflow))));
        assert!(it.next().is_none());
        assert!(framer.is_buffer_empty());

        assert_eq!(
            frames(&mut framer, b"$PAIR513*3D\r\n"),
            vec![b"$PAIR513*3D\r\n".to_vec()]
        );
    }

    #[test]
    fn test_consume_overflow_complete_frame() {
        let mut framer = SentenceFramer::new(8);
        let mut it = framer.consume(FIX_RATE_ACK);
        assert!(matches!(it.next(), Some(Err(TransportError::Overflow))));
        assert!(it.next().is_none());
    }
}
