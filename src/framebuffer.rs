// src/framebuffer.rs

//! CPU-side pixel storage and the borrowed view renderers draw through.
//!
//! Pixels are packed `0xAARRGGBB` in native-endian `u32` words. `pitch` is
//! the distance between the starts of consecutive rows in *bytes*; it may
//! exceed `width * 4` when rows are padded for alignment, and the padding
//! bytes are never touched by any drawing helper.
//!
//! The geometry invariants (non-zero dimensions, pixel-aligned pitch that
//! covers a full row, backing storage long enough for `pitch * height`) are
//! checked once, when a [`Framebuffer`] view is constructed or a
//! [`BackBuffer`] is allocated. Everything downstream relies on them.

use crate::error::ShellError;

/// Size of one packed pixel in bytes.
pub const BYTES_PER_PIXEL: usize = 4;

/// Packs an opaque color from 8-bit channels into `0xAARRGGBB` form.
///
/// Alpha is always `0xFF`; this shell never produces translucent pixels.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// A mutable view over one frame's pixels.
///
/// The view borrows its storage, so it cannot outlive the buffer it was
/// created from, and only one view can exist at a time. Constructing a view
/// validates the full geometry contract; a `Framebuffer` that exists is a
/// `Framebuffer` that is safe to draw through.
#[derive(Debug)]
pub struct Framebuffer<'a> {
    pixels: &'a mut [u32],
    width: u32,
    height: u32,
    pitch: usize,
}

impl<'a> Framebuffer<'a> {
    /// Creates a validated view over `pixels`.
    ///
    /// Fails with `InvalidDimensions` if either dimension is zero, and with
    /// `PreconditionViolation` if `pitch` cannot hold one row of pixels, is
    /// not a multiple of the pixel size, or `pixels` is too short to back
    /// `pitch * height` bytes.
    pub fn new(
        pixels: &'a mut [u32],
        width: u32,
        height: u32,
        pitch: usize,
    ) -> Result<Self, ShellError> {
        if width == 0 || height == 0 {
            return Err(ShellError::InvalidDimensions { width, height });
        }
        if pitch < width as usize * BYTES_PER_PIXEL {
            return Err(ShellError::PreconditionViolation(
                "pitch smaller than one row of pixels",
            ));
        }
        if pitch % BYTES_PER_PIXEL != 0 {
            return Err(ShellError::PreconditionViolation(
                "pitch not a whole number of pixels",
            ));
        }
        let required_words = (pitch / BYTES_PER_PIXEL)
            .checked_mul(height as usize)
            .ok_or(ShellError::PreconditionViolation(
                "pitch * height overflows usize",
            ))?;
        if pixels.len() < required_words {
            return Err(ShellError::PreconditionViolation(
                "backing slice shorter than pitch * height",
            ));
        }
        Ok(Framebuffer {
            pixels,
            width,
            height,
            pitch,
        })
    }

    /// Width of the drawable area in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the drawable area in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-to-row distance in bytes.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Row-to-row distance in whole pixels (`pitch / 4`).
    #[inline]
    pub fn stride_px(&self) -> usize {
        self.pitch / BYTES_PER_PIXEL
    }

    /// The raw backing words, padding included. Row `y` starts at
    /// `y * stride_px()`.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        self.pixels
    }

    /// The visible pixels of row `y`, padding excluded.
    ///
    /// Panics if `y >= height`; row access outside the validated geometry is
    /// a caller bug, not a recoverable condition.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        assert!(y < self.height, "row {} out of range", y);
        let start = y as usize * self.stride_px();
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable counterpart of [`Framebuffer::row`].
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        assert!(y < self.height, "row {} out of range", y);
        let start = y as usize * self.stride_px();
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }

    /// Fills every visible pixel with `color`, leaving row padding alone.
    pub fn clear(&mut self, color: u32) {
        for y in 0..self.height {
            for px in self.row_mut(y) {
                *px = color;
            }
        }
    }

    /// Fills the rectangle at (`x`, `y`) with extent `w` x `h`, clamped to
    /// the buffer edges. A rectangle entirely outside the buffer is a no-op.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: u32) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);
        let stride = self.stride_px();
        for row in y1..y2 {
            let start = row as usize * stride + x1 as usize;
            let end = row as usize * stride + x2 as usize;
            for px in &mut self.pixels[start..end] {
                *px = color;
            }
        }
    }
}

/// Owned pixel storage for one window's frames.
///
/// The buffer is allocated once and reused every frame; renderers never see
/// it directly, only the [`Framebuffer`] view handed out by
/// [`BackBuffer::view_mut`].
#[derive(Debug)]
pub struct BackBuffer {
    pixels: Box<[u32]>,
    width: u32,
    height: u32,
    pitch: usize,
}

impl BackBuffer {
    /// Allocates a buffer with tightly packed rows (`pitch == width * 4`).
    pub fn new(width: u32, height: u32) -> Result<Self, ShellError> {
        Self::with_pitch(width, height, width as usize * BYTES_PER_PIXEL)
    }

    /// Allocates a buffer with an explicit row pitch in bytes.
    ///
    /// The pitch must satisfy the same contract [`Framebuffer::new`] checks.
    /// Allocation itself is fallible: an overflowing size or a refused
    /// reservation reports `AllocationFailure` instead of aborting.
    pub fn with_pitch(width: u32, height: u32, pitch: usize) -> Result<Self, ShellError> {
        if width == 0 || height == 0 {
            return Err(ShellError::InvalidDimensions { width, height });
        }
        if pitch < width as usize * BYTES_PER_PIXEL {
            return Err(ShellError::PreconditionViolation(
                "pitch smaller than one row of pixels",
            ));
        }
        if pitch % BYTES_PER_PIXEL != 0 {
            return Err(ShellError::PreconditionViolation(
                "pitch not a whole number of pixels",
            ));
        }
        let words = (pitch / BYTES_PER_PIXEL)
            .checked_mul(height as usize)
            .ok_or(ShellError::AllocationFailure {
                width,
                height,
                pitch,
            })?;
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(words)
            .map_err(|_| ShellError::AllocationFailure {
                width,
                height,
                pitch,
            })?;
        storage.resize(words, 0);
        Ok(BackBuffer {
            pixels: storage.into_boxed_slice(),
            width,
            height,
            pitch,
        })
    }

    /// Width of the stored frame in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the stored frame in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-to-row distance in bytes.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Replaces the storage with a freshly allocated buffer for the new
    /// dimensions (tight pitch). On failure the existing buffer and its
    /// contents are left untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ShellError> {
        let next = BackBuffer::new(width, height)?;
        *self = next;
        Ok(())
    }

    /// Borrows the storage as a drawable view for one frame.
    pub fn view_mut(&mut self) -> Framebuffer<'_> {
        // Geometry was validated when this storage was allocated.
        Framebuffer {
            pixels: &mut self.pixels,
            width: self.width,
            height: self.height,
            pitch: self.pitch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        // Contract: zero width or height is InvalidDimensions, never a clamp.
        let mut storage = vec![0u32; 16];
        let err = Framebuffer::new(&mut storage, 0, 4, 16).unwrap_err();
        assert_eq!(err, ShellError::InvalidDimensions { width: 0, height: 4 });
        let err = Framebuffer::new(&mut storage, 4, 0, 16).unwrap_err();
        assert_eq!(err, ShellError::InvalidDimensions { width: 4, height: 0 });
    }

    #[test]
    fn test_new_rejects_undersized_pitch() {
        // Contract: pitch must cover at least one full row of pixels.
        let mut storage = vec![0u32; 16];
        let err = Framebuffer::new(&mut storage, 4, 4, 12).unwrap_err();
        assert!(matches!(err, ShellError::PreconditionViolation(_)));
    }

    #[test]
    fn test_new_rejects_misaligned_pitch() {
        let mut storage = vec![0u32; 32];
        let err = Framebuffer::new(&mut storage, 4, 4, 18).unwrap_err();
        assert!(matches!(err, ShellError::PreconditionViolation(_)));
    }

    #[test]
    fn test_new_rejects_short_backing_slice() {
        // 4x4 at pitch 16 needs 16 words; 15 is one short.
        let mut storage = vec![0u32; 15];
        let err = Framebuffer::new(&mut storage, 4, 4, 16).unwrap_err();
        assert!(matches!(err, ShellError::PreconditionViolation(_)));
    }

    #[test]
    fn test_pack_argb_layout() {
        // Contract: 0xAARRGGBB with alpha forced opaque.
        assert_eq!(pack_argb(0, 0, 0), 0xFF00_0000);
        assert_eq!(pack_argb(0x12, 0x34, 0x56), 0xFF12_3456);
        assert_eq!(pack_argb(0xFF, 0xFF, 0xFF), 0xFFFF_FFFF);
    }

    #[test]
    fn test_backbuffer_tight_pitch() {
        let buf = BackBuffer::new(7, 3).unwrap();
        assert_eq!(buf.width(), 7);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.pitch(), 28);
    }

    #[test]
    fn test_backbuffer_padded_pitch() {
        let mut buf = BackBuffer::with_pitch(4, 2, 32).unwrap();
        let frame = buf.view_mut();
        assert_eq!(frame.stride_px(), 8);
        assert_eq!(frame.pixels().len(), 16);
    }

    #[test]
    fn test_backbuffer_rejects_zero_dimensions() {
        assert_eq!(
            BackBuffer::new(0, 10).unwrap_err(),
            ShellError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_backbuffer_overflowing_size_is_allocation_failure() {
        // Contract: a pitch * height that does not fit in usize is
        // AllocationFailure, not a panic.
        let pitch = (usize::MAX - 3) & !3;
        let err = BackBuffer::with_pitch(4, u32::MAX, pitch).unwrap_err();
        assert_eq!(
            err,
            ShellError::AllocationFailure {
                width: 4,
                height: u32::MAX,
                pitch
            }
        );
    }

    #[test]
    fn test_backbuffer_refused_reservation_is_allocation_failure() {
        // 2^24 x 2^24 pixels asks for a petabyte; the allocator declines and
        // the failure surfaces as an error instead of an abort.
        let err = BackBuffer::new(1 << 24, 1 << 24).unwrap_err();
        assert!(matches!(err, ShellError::AllocationFailure { .. }));
    }

    #[test]
    fn test_resize_replaces_geometry() {
        let mut buf = BackBuffer::new(4, 4).unwrap();
        buf.view_mut().clear(0xFFAA_BBCC);
        buf.resize(8, 2).unwrap();
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.pitch(), 32);
        // Fresh storage starts zeroed.
        assert!(buf.view_mut().pixels().iter().all(|&px| px == 0));
    }

    #[test]
    fn test_failed_resize_preserves_buffer() {
        // Contract: resize is atomic; on error the old frame survives intact.
        let mut buf = BackBuffer::new(2, 2).unwrap();
        buf.view_mut().clear(0xFF11_2233);
        let err = buf.resize(0, 5).unwrap_err();
        assert_eq!(err, ShellError::InvalidDimensions { width: 0, height: 5 });
        assert_eq!(buf.width(), 2);
        assert_eq!(buf.height(), 2);
        assert!(buf.view_mut().pixels().iter().all(|&px| px == 0xFF11_2233));
    }

    #[test]
    fn test_clear_skips_row_padding() {
        // 2 visible pixels per row, 2 words of padding per row.
        let mut buf = BackBuffer::with_pitch(2, 2, 16).unwrap();
        let mut frame = buf.view_mut();
        frame.clear(0xFFFF_FFFF);
        let words = frame.pixels();
        assert_eq!(&words[0..2], &[0xFFFF_FFFF, 0xFFFF_FFFF]);
        assert_eq!(&words[2..4], &[0, 0]);
        assert_eq!(&words[4..6], &[0xFFFF_FFFF, 0xFFFF_FFFF]);
        assert_eq!(&words[6..8], &[0, 0]);
    }

    #[test]
    fn test_fill_rect_clamps_to_bounds() {
        let mut buf = BackBuffer::new(4, 4).unwrap();
        let mut frame = buf.view_mut();
        frame.fill_rect(2, 2, 10, 10, 0xFFDE_ADBE);
        for y in 0..4u32 {
            for x in 0..4u32 {
                let expected = if x >= 2 && y >= 2 { 0xFFDE_ADBE } else { 0 };
                assert_eq!(frame.row(y)[x as usize], expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_fill_rect_outside_is_noop() {
        let mut buf = BackBuffer::new(4, 4).unwrap();
        let mut frame = buf.view_mut();
        frame.fill_rect(4, 4, 2, 2, 0xFFFF_FFFF);
        frame.fill_rect(u32::MAX, 0, u32::MAX, 1, 0xFFFF_FFFF);
        assert!(frame.pixels().iter().all(|&px| px == 0));
    }

    #[test]
    fn test_row_mut_is_width_pixels() {
        let mut buf = BackBuffer::with_pitch(3, 2, 20).unwrap();
        let mut frame = buf.view_mut();
        assert_eq!(frame.row_mut(1).len(), 3);
        frame.row_mut(1)[2] = 0xFF00_00FF;
        // Row 1 starts at word 5 (pitch 20 / 4); its third pixel is word 7.
        assert_eq!(frame.pixels()[7], 0xFF00_00FF);
    }
}
