//! Core type aliases

/// Standard Result type for the engine
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// RGBA color with components in `[0, 1]`
pub type Rgba = [f32; 4];

/// Convert an 8-bit RGBA quadruple to normalized floats.
#[inline]
pub fn rgba_from_u8(c: [u8; 4]) -> Rgba {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        c[3] as f32 / 255.0,
    ]
}
