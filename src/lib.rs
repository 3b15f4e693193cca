//! This crate provides routines for encoding index-color raster
//! images as GIF89a files.
//!
//! # Examples
//!
//! ```
//! const SCREEN_W: usize = 320;
//! const SCREEN_H: usize = 200;
//! const NUM_COLS: usize = 256;
//! let buf = vec![0; SCREEN_W * SCREEN_H];
//! let pal = [0; 3 * NUM_COLS];
//!
//! let raster = gifenc::Raster::new(SCREEN_W, SCREEN_H, &buf, &pal);
//! let mut out = Vec::new();
//! gifenc::encode(&raster, &mut out).expect("encode");
//! ```

extern crate byteorder;
extern crate libc;
#[macro_use]
extern crate quick_error;

pub use errcode::GifError;
pub use errcode::GifResult;
pub use gif::GifEncoder;
pub use gif::encode;

pub mod errcode;
pub mod ffi;
pub mod gif;
pub mod lzw;
mod raster;

/// Index-color raster, referencing a screen buffer and palette
/// owned by the caller.
///
/// The buffer is stored in row-major order, row 0 being the top row
/// of the image.  The pixel in column `px`, row `py` of the encoded
/// image is `buf[stride * (y + py) + (x + px)]`, and its value is an
/// index into the palette.
///
/// The palette holds one RGB triple per color, 3 bytes per entry,
/// entry `i` occupying `pal[(3 * i)..(3 * i + 3)]`.
pub struct Raster<'a> {
    /// x-offset of the raster in the buffer.
    pub x: usize,

    /// y-offset of the raster in the buffer.
    pub y: usize,

    /// Raster width.  GIF limits dimensions to 65535.
    pub w: usize,

    /// Raster height.  GIF limits dimensions to 65535.
    pub h: usize,

    /// Buffer stride, i.e. the number of pixels per row in the
    /// backing buffer, which may be greater than `w`.
    pub stride: usize,

    /// Screen buffer of palette indices.
    pub buf: &'a [u8],

    /// Palette memory, RGB triples, at most 256 entries.
    pub pal: &'a [u8],
}
