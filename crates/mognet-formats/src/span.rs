//! Bounds-checked windows over an immutable byte buffer
//!
//! A [`Span`] is a cheap, copyable view `{begin, current, end}` into one
//! fully-loaded buffer. Walkers hand copies of their span to child decoders
//! and narrow them with [`Span::crop`] before delegating, so an offset
//! computed from corrupt input fails at the point of narrowing instead of
//! producing a silent out-of-bounds read later. Any number of spans may
//! alias the same buffer; all access is read-only.

use std::io::SeekFrom;
use thiserror::Error;

/// Span-level error type
#[derive(Debug, Error)]
pub enum SpanError {
    /// A seek target or crop window fell outside the current window
    #[error("offset range [{from}, {to}] is not inside [{begin}, {end}]")]
    OutOfRange {
        /// First byte offset of the rejected candidate
        from: i128,
        /// Last byte offset of the rejected candidate
        to: i128,
        /// Window start, absolute within the buffer
        begin: usize,
        /// Window end, absolute within the buffer
        end: usize,
    },

    /// A fixed-width field read past the end of the window
    #[error("truncated field: {needed} byte(s) needed, {available} available")]
    Truncated {
        /// Bytes the field requires
        needed: usize,
        /// Bytes left before the window end
        available: usize,
    },
}

/// Result type for span operations
pub type SpanResult<T> = Result<T, SpanError>;

/// Read-only cursor over a sub-window of an immutable buffer
///
/// Invariant: `begin <= current <= end <= data.len()`. The two mutating
/// operations, [`seek`](Self::seek) and [`crop`](Self::crop), re-establish
/// it or fail without side effect. Crop is one-way: once narrowed, a span
/// never regains bytes outside the window it was cropped from.
#[derive(Debug, Clone, Copy)]
pub struct Span<'a> {
    data: &'a [u8],
    begin: usize,
    current: usize,
    end: usize,
}

impl<'a> Span<'a> {
    /// Create a span covering the whole buffer, positioned at its start.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            begin: 0,
            current: 0,
            end: data.len(),
        }
    }

    /// Window length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Current position, relative to the window start.
    pub fn position(&self) -> usize {
        self.current - self.begin
    }

    /// Bytes left between the current position and the window end.
    pub fn remaining(&self) -> usize {
        self.end - self.current
    }

    /// The whole window as a slice, ignoring the current position.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.data[self.begin..self.end]
    }

    /// The bytes from the current position to the window end.
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.current..self.end]
    }

    /// Move the current position inside the window.
    ///
    /// A candidate outside `[begin, end]` fails with
    /// [`SpanError::OutOfRange`] and leaves the span untouched. Returns the
    /// new position relative to the window start.
    pub fn seek(&mut self, from: SeekFrom) -> SpanResult<usize> {
        let candidate = self.resolve(from);

        if candidate < self.begin as i128 || candidate > self.end as i128 {
            return Err(SpanError::OutOfRange {
                from: candidate,
                to: candidate,
                begin: self.begin,
                end: self.end,
            });
        }

        self.current = candidate as usize;
        Ok(self.current - self.begin)
    }

    /// Permanently narrow the window to `len` bytes starting at the
    /// resolved offset, and reset the current position to the new start.
    ///
    /// Both bounds of the candidate window must lie inside the current one;
    /// a request past either edge fails with [`SpanError::OutOfRange`]
    /// instead of clamping, leaving the span untouched. Returns the new
    /// window length.
    pub fn crop(&mut self, from: SeekFrom, len: usize) -> SpanResult<usize> {
        let new_begin = self.resolve(from);
        let new_end = new_begin + len as i128;

        if new_begin < self.begin as i128
            || new_begin > self.end as i128
            || new_end < self.begin as i128
            || new_end > self.end as i128
        {
            return Err(SpanError::OutOfRange {
                from: new_begin,
                to: new_end,
                begin: self.begin,
                end: self.end,
            });
        }

        self.begin = new_begin as usize;
        self.current = self.begin;
        self.end = new_end as usize;
        Ok(self.end - self.begin)
    }

    /// Consume `len` bytes at the current position, advancing past them.
    pub(crate) fn take(&mut self, len: usize) -> SpanResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(SpanError::Truncated {
                needed: len,
                available: self.remaining(),
            });
        }

        let bytes = &self.data[self.current..self.current + len];
        self.current += len;
        Ok(bytes)
    }

    /// Absolute buffer offset a whence/offset pair points at. Computed in
    /// wide arithmetic so that large or negative offsets cannot wrap.
    fn resolve(&self, from: SeekFrom) -> i128 {
        match from {
            SeekFrom::Start(offset) => self.begin as i128 + offset as i128,
            SeekFrom::Current(offset) => self.current as i128 + offset as i128,
            SeekFrom::End(offset) => self.end as i128 + offset as i128,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seek_within_window() {
        let data = [0u8; 16];
        let mut span = Span::new(&data);

        assert_eq!(span.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(span.position(), 4);
        assert_eq!(span.seek(SeekFrom::Current(-2)).unwrap(), 2);
        assert_eq!(span.seek(SeekFrom::End(-1)).unwrap(), 15);
        // Both edges are valid positions.
        assert_eq!(span.seek(SeekFrom::Start(0)).unwrap(), 0);
        assert_eq!(span.seek(SeekFrom::End(0)).unwrap(), 16);
    }

    #[test]
    fn seek_out_of_range_has_no_side_effect() {
        let data = [0u8; 16];
        let mut span = Span::new(&data);
        span.seek(SeekFrom::Start(8)).unwrap();

        assert!(matches!(
            span.seek(SeekFrom::Start(17)),
            Err(SpanError::OutOfRange { .. })
        ));
        assert!(matches!(
            span.seek(SeekFrom::Current(-9)),
            Err(SpanError::OutOfRange { .. })
        ));

        assert_eq!(span.position(), 8);
    }

    #[test]
    fn crop_narrows_window() {
        let data: Vec<u8> = (0..16).collect();
        let mut span = Span::new(&data);
        span.seek(SeekFrom::Start(12)).unwrap();

        assert_eq!(span.crop(SeekFrom::Start(4), 8).unwrap(), 8);
        assert_eq!(span.len(), 8);
        // Cropping repositions the cursor to the new window start.
        assert_eq!(span.position(), 0);
        assert_eq!(span.as_bytes(), &data[4..12]);
    }

    #[test]
    fn crop_never_clamps() {
        let data = [0u8; 16];
        let mut span = Span::new(&data);
        span.crop(SeekFrom::Start(4), 8).unwrap();

        // One byte past the cropped window, even though the buffer has room.
        assert!(matches!(
            span.crop(SeekFrom::Start(0), 9),
            Err(SpanError::OutOfRange { .. })
        ));
        // A cropped span can never re-expand toward the buffer start either.
        assert!(matches!(
            span.crop(SeekFrom::Start(0), usize::MAX),
            Err(SpanError::OutOfRange { .. })
        ));
        assert_eq!(span.len(), 8);
    }

    #[test]
    fn crop_from_current_and_end() {
        let data: Vec<u8> = (0..16).collect();
        let mut span = Span::new(&data);
        span.seek(SeekFrom::Start(2)).unwrap();

        let mut tail = span;
        tail.crop(SeekFrom::End(-4), 4).unwrap();
        assert_eq!(tail.as_bytes(), &data[12..16]);

        span.crop(SeekFrom::Current(2), 5).unwrap();
        assert_eq!(span.as_bytes(), &data[4..9]);
    }

    #[test]
    fn copies_alias_without_interference() {
        let data: Vec<u8> = (0..16).collect();
        let mut a = Span::new(&data);
        let mut b = a;

        a.crop(SeekFrom::Start(0), 4).unwrap();
        b.seek(SeekFrom::Start(10)).unwrap();

        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 16);
        assert_eq!(b.position(), 10);
    }

    #[test]
    fn take_consumes_and_reports_truncation() {
        let data = [1u8, 2, 3, 4];
        let mut span = Span::new(&data);

        assert_eq!(span.take(3).unwrap(), &[1, 2, 3]);
        assert!(matches!(
            span.take(2),
            Err(SpanError::Truncated {
                needed: 2,
                available: 1
            })
        ));
        // The failed take must not consume the remaining byte.
        assert_eq!(span.take(1).unwrap(), &[4]);
    }

    proptest! {
        /// Any position inside the cropped window is reachable by an
        /// absolute seek and reported relative to the window start.
        #[test]
        fn seek_reaches_every_position_in_window(
            (len, begin, end, pos) in (1usize..256)
                .prop_flat_map(|len| (Just(len), 0..=len))
                .prop_flat_map(|(len, begin)| (Just(len), Just(begin), begin..=len))
                .prop_flat_map(|(len, begin, end)| {
                    (Just(len), Just(begin), Just(end), begin..=end)
                })
        ) {
            let data = vec![0u8; len];
            let mut span = Span::new(&data);
            span.crop(SeekFrom::Start(begin as u64), end - begin).unwrap();

            let relative = pos - begin;
            prop_assert_eq!(
                span.seek(SeekFrom::Start(relative as u64)).unwrap(),
                relative
            );
            prop_assert_eq!(span.position(), relative);
        }

        /// A successful crop always produces a subset of the prior window.
        #[test]
        fn crop_is_monotonic_narrowing(
            len in 0usize..256,
            offset in 0usize..512,
            sub in 0usize..512,
        ) {
            let data = vec![0u8; len];
            let mut span = Span::new(&data);
            let before = (span.begin, span.end);

            if span.crop(SeekFrom::Start(offset as u64), sub).is_ok() {
                prop_assert!(span.begin >= before.0);
                prop_assert!(span.end <= before.1);
                prop_assert_eq!(span.len(), sub);
            } else {
                // Failure leaves the window untouched.
                prop_assert_eq!((span.begin, span.end), before);
            }
        }

        /// Positions outside the window are always rejected.
        #[test]
        fn seek_past_end_is_rejected(len in 0usize..256, beyond in 1usize..64) {
            let data = vec![0u8; len];
            let mut span = Span::new(&data);
            prop_assert!(
                matches!(
                    span.seek(SeekFrom::Start((len + beyond) as u64)),
                    Err(SpanError::OutOfRange { .. })
                ),
                "seek past end should be rejected"
            );
            prop_assert!(
                matches!(
                    span.seek(SeekFrom::Current(-(beyond as i64))),
                    Err(SpanError::OutOfRange { .. })
                ),
                "seek before start should be rejected"
            );
        }
    }
}
