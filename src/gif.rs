//! GIF89a implementation.
//!
//! A GIF data stream is a sequence of blocks between a fixed
//! signature and a one-byte trailer.  This encoder always emits the
//! following layout:
//!
//!   Block                     | Description
//!   ------------------------- | -----------------------------------
//!   Signature                 | 6 bytes, "GIF89a".
//!   Logical screen descriptor | Screen size, color table flags, background index, pixel aspect ratio.
//!   Global color table        | RGB triples, padded to the declared power-of-two size.
//!   Application extension     | NETSCAPE 2.0 looping block (optional).
//!   Comment extension         | Text sub-blocks (optional).
//!   Graphic control extension | Disposal/delay/transparency for the image that follows.
//!   Image descriptor          | Image position (0, 0) and size.
//!   Table based image data    | LZW minimum code size byte, compressed sub-blocks.
//!   Trailer                   | 1 byte, 0x3B.
//!
//! All multi-byte integers are stored little-endian.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use byteorder::LittleEndian as LE;
use byteorder::WriteBytesExt;

use ::{GifError,GifResult,Raster};
use lzw;

/// Signature and version identifying a GIF89a data stream.
pub const GIF_SIGNATURE: &'static [u8; 6] = b"GIF89a";

/// Trailer byte closing a GIF data stream.
pub const GIF_TRAILER: u8 = 0x3B;

/// Largest width or height a GIF can describe; dimensions are
/// stored as unsigned 16-bit values.
pub const MAX_DIMENSION: usize = 65535;

/// Largest number of palette entries the global color table can
/// describe.
pub const MAX_COLORS: usize = 256;

/// Introducer byte starting every extension block.
const EXT_INTRODUCER: u8 = 0x21;

/// Label of the graphic control extension.
const LABEL_GRAPHIC_CONTROL: u8 = 0xF9;

/// Label of the comment extension.
const LABEL_COMMENT: u8 = 0xFE;

/// Label of the application extension.
const LABEL_APPLICATION: u8 = 0xFF;

/// Separator byte starting the image descriptor.
const IMAGE_SEPARATOR: u8 = 0x2C;

/// GIF89a encoder.
///
/// Holds the optional metadata written around the image data.  The
/// defaults produce a minimal single-image file: background index 0,
/// no comment, no looping block, no transparency.
pub struct GifEncoder {
    background: u8,
    transparent: Option<u8>,
    loop_count: Option<u16>,
    comment: Option<String>,
}

/*--------------------------------------------------------------*/

impl GifEncoder {
    /// Allocate a new encoder with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// let buf = [0; 4];
    /// let pal = [0; 3 * 2];
    /// let raster = gifenc::Raster::new(2, 2, &buf, &pal);
    ///
    /// let mut enc = gifenc::GifEncoder::new();
    /// enc.set_comment("quick brown fox");
    ///
    /// let mut out = Vec::new();
    /// enc.encode(&raster, &mut out).expect("encode");
    /// ```
    pub fn new() -> Self {
        GifEncoder {
            background: 0,
            transparent: None,
            loop_count: None,
            comment: None,
        }
    }

    /// Set the background color index written in the logical screen
    /// descriptor.
    pub fn set_background(&mut self, index: u8) {
        self.background = index;
    }

    /// Mark a palette entry as transparent.
    pub fn set_transparent(&mut self, index: u8) {
        self.transparent = Some(index);
    }

    /// Write a NETSCAPE 2.0 looping application extension.
    ///
    /// A count of 0 requests endless looping.  Single-image files do
    /// not need this block; it matters to animation-capable viewers.
    pub fn set_loop_count(&mut self, count: u16) {
        self.loop_count = Some(count);
    }

    /// Write a comment extension containing the given text.
    pub fn set_comment(&mut self, text: &str) {
        self.comment = Some(text.to_string());
    }

    /// Encode the raster as a complete GIF89a data stream.
    ///
    /// The raster is validated before any byte is written.  If the
    /// sink fails mid-stream, the output produced so far is not a
    /// valid GIF and should be discarded.
    pub fn encode<W: Write>(&self, raster: &Raster, w: &mut W)
            -> GifResult<()> {
        check_raster(raster)?;

        w.write_all(GIF_SIGNATURE)?;
        write_screen_desc(raster, self.background, w)?;
        write_color_table(raster, w)?;

        if let Some(count) = self.loop_count {
            write_appl_block(count, w)?;
        }
        if let Some(ref text) = self.comment {
            write_comment_block(text, w)?;
        }

        write_graphic_control(self.transparent, w)?;
        write_image_desc(raster, w)?;
        lzw::compress(raster, w)?;

        w.write_u8(GIF_TRAILER)?;
        Ok(())
    }

    /// Encode the raster into a newly created file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// let buf = [0; 4];
    /// let pal = [0; 3 * 2];
    /// let raster = gifenc::Raster::new(2, 2, &buf, &pal);
    ///
    /// let enc = gifenc::GifEncoder::new();
    /// enc.encode_to_file(Path::new("ex.gif"), &raster);
    /// ```
    pub fn encode_to_file(&self, filename: &Path, raster: &Raster)
            -> GifResult<()> {
        let mut file = File::create(filename)?;
        self.encode(raster, &mut file)
    }
}

/// Encode the raster as a GIF89a data stream with default settings.
///
/// # Examples
///
/// ```
/// let buf = [0; 4];
/// let pal = [0; 3 * 2];
/// let raster = gifenc::Raster::new(2, 2, &buf, &pal);
///
/// let mut out = Vec::new();
/// gifenc::encode(&raster, &mut out).expect("encode");
/// ```
pub fn encode<W: Write>(raster: &Raster, w: &mut W)
        -> GifResult<()> {
    GifEncoder::new().encode(raster, w)
}

/*--------------------------------------------------------------*/

/// Validate the raster before encoding starts.
fn check_raster(raster: &Raster)
        -> GifResult<()> {
    if raster.w < 1 || raster.h < 1
            || raster.w > MAX_DIMENSION || raster.h > MAX_DIMENSION {
        return Err(GifError::WrongResolution);
    }

    let ncols = raster.num_colors();
    if ncols > MAX_COLORS {
        return Err(GifError::PaletteTooLarge(ncols));
    }

    for py in 0..raster.h {
        for &c in raster.row(py) {
            if c as usize >= ncols {
                return Err(GifError::InvalidPixelIndex(c, ncols));
            }
        }
    }

    Ok(())
}

/// Number of bits needed to index the color table, in 1..=8.  The
/// table on disk is padded to hold `1 << depth` entries.
fn color_table_depth(ncols: usize)
        -> u8 {
    let mut depth = 1;
    while (1 << depth) < ncols {
        depth = depth + 1;
    }
    depth
}

/// Write the logical screen descriptor.
///
///   Offset | Length |   Name     | Description
///   ------:| ------:|:----------:| ---------------------------------
///        0 |      2 |   width    | Logical screen width in pixels.
///        2 |      2 |   height   | Logical screen height in pixels.
///        4 |      1 |   flags    | Bit 7: global color table present.  Bits 4-6: color resolution.  Bits 0-2: log2(color table size) - 1.
///        5 |      1 | background | Background color index.
///        6 |      1 |   aspect   | Pixel aspect ratio, 0 = unspecified.
fn write_screen_desc<W: Write>(
        raster: &Raster, background: u8, w: &mut W)
        -> GifResult<()> {
    let depth = color_table_depth(raster.num_colors());
    let flags = 0x80 | (0x7 << 4) | (depth - 1);

    w.write_u16::<LE>(raster.w as u16)?;
    w.write_u16::<LE>(raster.h as u16)?;
    w.write_u8(flags)?;
    w.write_u8(background)?;
    w.write_u8(0)?;
    Ok(())
}

/// Write the global color table, padding with black entries up to
/// the size declared in the screen descriptor.
fn write_color_table<W: Write>(
        raster: &Raster, w: &mut W)
        -> GifResult<()> {
    let ncols = raster.num_colors();
    let depth = color_table_depth(ncols);

    w.write_all(raster.pal)?;
    for _ in ncols..(1 << depth) {
        w.write_all(&[0, 0, 0])?;
    }
    Ok(())
}

/// Write the NETSCAPE 2.0 looping application extension.
fn write_appl_block<W: Write>(
        loop_count: u16, w: &mut W)
        -> GifResult<()> {
    w.write_u8(EXT_INTRODUCER)?;
    w.write_u8(LABEL_APPLICATION)?;
    w.write_u8(11)?;
    w.write_all(b"NETSCAPE2.0")?;
    w.write_u8(3)?;
    w.write_u8(1)?;
    w.write_u16::<LE>(loop_count)?;
    w.write_u8(0)?;
    Ok(())
}

/// Write a comment extension.  The text is split into sub-blocks of
/// at most 255 bytes.
fn write_comment_block<W: Write>(
        text: &str, w: &mut W)
        -> GifResult<()> {
    w.write_u8(EXT_INTRODUCER)?;
    w.write_u8(LABEL_COMMENT)?;
    for chunk in text.as_bytes().chunks(255) {
        w.write_u8(chunk.len() as u8)?;
        w.write_all(chunk)?;
    }
    w.write_u8(0)?;
    Ok(())
}

/// Write the graphic control extension.
///
///   Offset | Length |   Name      | Description
///   ------:| ------:|:-----------:| --------------------------------
///        0 |      1 |   flags     | Bit 0: transparent index valid.  Bits 2-4: disposal method.
///        1 |      2 |   delay     | Frame delay in centiseconds.
///        3 |      1 | transparent | Transparent color index.
fn write_graphic_control<W: Write>(
        transparent: Option<u8>, w: &mut W)
        -> GifResult<()> {
    w.write_u8(EXT_INTRODUCER)?;
    w.write_u8(LABEL_GRAPHIC_CONTROL)?;
    w.write_u8(4)?;
    match transparent {
        Some(index) => {
            w.write_u8(0x01)?;
            w.write_u16::<LE>(0)?;
            w.write_u8(index)?;
        },
        None => {
            w.write_u8(0)?;
            w.write_u16::<LE>(0)?;
            w.write_u8(0)?;
        },
    }
    w.write_u8(0)?;
    Ok(())
}

/// Write the image descriptor.  The single image always covers the
/// whole logical screen, without interlacing or a local color table.
fn write_image_desc<W: Write>(
        raster: &Raster, w: &mut W)
        -> GifResult<()> {
    w.write_u8(IMAGE_SEPARATOR)?;
    w.write_u16::<LE>(0)?;
    w.write_u16::<LE>(0)?;
    w.write_u16::<LE>(raster.w as u16)?;
    w.write_u16::<LE>(raster.h as u16)?;
    w.write_u8(0)?;
    Ok(())
}
