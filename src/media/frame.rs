use bytes::Bytes;

/// Decoded video frame, tightly packed RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

impl VideoFrame {
    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn new(width: u32, height: u32, data: impl Into<Bytes>) -> Self {
        VideoFrame {
            data: data.into(),
            width,
            height,
        }
    }

    /// Build a frame from an RGBA plane whose rows may be padded to `stride` bytes.
    ///
    /// Rows missing from a short source are left black.
    pub fn from_padded_rgba(src: &[u8], stride: usize, width: u32, height: u32) -> Self {
        let row = width as usize * Self::BYTES_PER_PIXEL;
        let rows = height as usize;

        // Fast path: no stride padding
        if stride == row && src.len() >= row * rows {
            return VideoFrame::new(width, height, Bytes::copy_from_slice(&src[..row * rows]));
        }

        let mut packed = vec![0u8; row * rows];
        for (r, dst) in packed.chunks_exact_mut(row).enumerate() {
            let start = r * stride;
            if start + row > src.len() {
                break;
            }
            dst.copy_from_slice(&src[start..start + row]);
        }
        VideoFrame::new(width, height, packed)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_source_is_copied_as_is() {
        let src: Vec<u8> = (0..16).collect();
        let frame = VideoFrame::from_padded_rgba(&src, 8, 2, 2);

        assert_eq!(frame.width, 2);
        assert_eq!(frame.height, 2);
        assert_eq!(&frame.data[..], &src[..]);
    }

    #[test]
    fn test_stride_padding_is_stripped() {
        // 1x2 frame, rows padded from 4 to 6 bytes
        let src = [1, 2, 3, 4, 0xEE, 0xEE, 5, 6, 7, 8, 0xEE, 0xEE];
        let frame = VideoFrame::from_padded_rgba(&src, 6, 1, 2);

        assert_eq!(&frame.data[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_short_source_leaves_missing_rows_black() {
        let src = [9, 9, 9, 9, 0, 0];
        let frame = VideoFrame::from_padded_rgba(&src, 6, 1, 2);

        assert_eq!(&frame.data[..], &[9, 9, 9, 9, 0, 0, 0, 0]);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_zero_sized_frame_is_empty() {
        assert!(VideoFrame::new(0, 720, Vec::new()).is_empty());
    }
}
