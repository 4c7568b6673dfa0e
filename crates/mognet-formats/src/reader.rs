//! Fixed-width field decoding
//!
//! The single seam every scalar in both formats is read through. Each
//! function consumes its field width from the span's current position and
//! fails with [`SpanError::Truncated`](crate::span::SpanError::Truncated)
//! when the window runs out, so truncation surfaces uniformly no matter how
//! deep the caller sits in the container hierarchy.

use crate::span::{Span, SpanResult};

/// Read one byte.
pub fn read_u8(span: &mut Span<'_>) -> SpanResult<u8> {
    let bytes = span.take(1)?;
    Ok(bytes[0])
}

/// Read a little-endian u16.
pub fn read_u16_le(span: &mut Span<'_>) -> SpanResult<u16> {
    let bytes = span.take(2)?;
    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian u32.
pub fn read_u32_le(span: &mut Span<'_>) -> SpanResult<u32> {
    let bytes = span.take(4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a big-endian u32.
pub fn read_u32_be(span: &mut Span<'_>) -> SpanResult<u32> {
    let bytes = span.take(4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::span::SpanError;

    #[test]
    fn reads_advance_in_sequence() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xDE, 0xAD, 0xBE, 0xEF];
        let mut span = Span::new(&data);

        assert_eq!(read_u8(&mut span).unwrap(), 0x01);
        assert_eq!(read_u16_le(&mut span).unwrap(), 0x1234);
        assert_eq!(read_u32_le(&mut span).unwrap(), 0x12345678);
        assert_eq!(read_u32_be(&mut span).unwrap(), 0xDEADBEEF);
        assert_eq!(span.remaining(), 0);
    }

    #[test]
    fn truncated_read_reports_widths() {
        let data = [0xAA, 0xBB];
        let mut span = Span::new(&data);

        assert!(matches!(
            read_u32_le(&mut span),
            Err(SpanError::Truncated {
                needed: 4,
                available: 2
            })
        ));
        // The failed read leaves the position alone.
        assert_eq!(read_u16_le(&mut span).unwrap(), 0xBBAA);
    }
}
