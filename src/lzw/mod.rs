//! GIF LZW compression subroutines.
//!
//! GIF compresses pixel data with a variant of Lempel-Ziv-Welch
//! using variable-width codes.  Codes start out 9 bits wide and grow
//! one bit at a time, up to 12 bits, as the dictionary fills.  Two
//! code values are reserved: a clear code instructing the decoder to
//! discard its dictionary, and an end-of-information code closing
//! the stream.  The packed bit stream is segmented into sub-blocks
//! of at most 255 bytes.

mod bitbuf;
mod table;

use std::io::Write;
use byteorder::WriteBytesExt;

use ::{GifResult,Raster};
use self::bitbuf::BitBuffer;
use self::table::{CodeTable,Probe};

/// Initial number of bits per pixel declared in the stream.  Codes
/// are always one bit wider.
pub const MIN_CODE_SIZE: u8 = 8;

/// Code instructing the decoder to reset its dictionary.
pub const CLEAR_CODE: u16 = 256;

/// Code marking the end of the compressed stream.
pub const EOF_CODE: u16 = 257;

/// First dictionary code available for multi-pixel strings.
const FIRST_FREE_CODE: u16 = 258;

/// Largest code value the 12-bit maximum width can express.
const MAX_CODE_VALUE: u16 = 4095;

/// Code width bounds, in bits.
const INITIAL_CODE_SIZE: u16 = 9;
const MAX_CODE_SIZE: u16 = 12;

/// Compression state: the current code width, the limit at which it
/// grows, and the next unclaimed dictionary code.
struct EncoderState {
    code_size: u16,
    max_code: u16,
    free_code: u16,
}

impl EncoderState {
    fn new() -> Self {
        EncoderState {
            code_size: INITIAL_CODE_SIZE,
            max_code: 1 << INITIAL_CODE_SIZE,
            free_code: FIRST_FREE_CODE,
        }
    }

    fn reset(&mut self, table: &mut CodeTable) {
        self.code_size = INITIAL_CODE_SIZE;
        self.max_code = 1 << INITIAL_CODE_SIZE;
        self.free_code = FIRST_FREE_CODE;
        table.reset();
    }
}

/// Compress the raster's pixels into a table based image data
/// stream: the initial minimum code size byte, followed by the
/// packed codes in sub-blocks, followed by the block terminator.
///
/// The caller is expected to have validated the raster.
pub fn compress<W: Write>(raster: &Raster, w: &mut W)
        -> GifResult<()> {
    let mut table = CodeTable::new();
    let mut bits = BitBuffer::new();
    let mut state = EncoderState::new();

    w.write_u8(MIN_CODE_SIZE)?;
    bits.write_code(w, CLEAR_CODE, state.code_size)?;

    // The first pixel seeds the run; every later pixel either
    // extends the run or closes it with an emitted code.
    let mut current = raster.row(0)[0] as u16;

    for py in 0..raster.h {
        let row = raster.row(py);
        let row = if py == 0 { &row[1..] } else { row };

        for &c in row {
            match table.probe(current, c) {
                Probe::Found(code) => {
                    current = code;
                },
                Probe::Free(slot) => {
                    bits.write_code(w, current, state.code_size)?;

                    let prev_free = state.free_code;
                    if state.free_code <= MAX_CODE_VALUE {
                        table.claim(slot, current, state.free_code, c);
                        state.free_code = state.free_code + 1;
                    }
                    if prev_free == state.max_code {
                        if state.code_size < MAX_CODE_SIZE {
                            state.code_size = state.code_size + 1;
                            state.max_code = state.max_code * 2;
                        } else {
                            bits.write_code(w, CLEAR_CODE, state.code_size)?;
                            state.reset(&mut table);
                        }
                    }

                    current = c as u16;
                },
                Probe::Full => {
                    // The probe sequence can wrap without finding a
                    // free slot even though the code space is not
                    // exhausted.  Close the pending run and start
                    // over with a fresh dictionary.
                    //
                    // A full probe needs more live entries than any
                    // code width below the maximum can address, so
                    // the extra emission cannot land on a width-growth
                    // boundary and the decoder stays in step through
                    // the clear.
                    bits.write_code(w, current, state.code_size)?;
                    bits.write_code(w, CLEAR_CODE, state.code_size)?;
                    state.reset(&mut table);

                    current = c as u16;
                },
            }
        }
    }

    bits.write_code(w, current, state.code_size)?;
    bits.write_code(w, EOF_CODE, state.code_size)?;
    bits.finish(w)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use ::Raster;
    use super::{CLEAR_CODE,EOF_CODE,compress};

    /// Read back the codes of a compressed stream, tracking the code
    /// width the way a decoder does.
    fn read_codes(src: &[u8]) -> Vec<u16> {
        assert_eq!(src[0], 8);

        let mut data = Vec::new();
        let mut pos = 1;
        while src[pos] != 0 {
            let n = src[pos] as usize;
            data.extend_from_slice(&src[(pos + 1)..(pos + 1 + n)]);
            pos = pos + 1 + n;
        }
        assert_eq!(pos, src.len() - 1);

        let mut codes = Vec::new();
        let mut acc: u32 = 0;
        let mut nbits = 0;
        let mut width = 9;
        let mut free: u32 = 258;
        let mut first = true;
        let mut byte = data.iter();

        loop {
            while nbits < width {
                acc = acc | ((*byte.next().unwrap() as u32) << nbits);
                nbits = nbits + 8;
            }
            let code = (acc & ((1 << width) - 1)) as u16;
            acc = acc >> width;
            nbits = nbits - width;
            codes.push(code);

            if code == EOF_CODE {
                return codes;
            } else if code == CLEAR_CODE {
                width = 9;
                free = 258;
                first = true;
            } else if first {
                first = false;
            } else {
                if free <= 4095 {
                    free = free + 1;
                }
                if free == (1 << width) && width < 12 {
                    width = width + 1;
                }
            }
        }
    }

    #[test]
    fn test_single_pixel() {
        let expected = [
            8,          // minimum code size
            4,          // sub-block length
            0x00, 0x01, // clear code
            0x04, 0x04, // pixel 0, then EOF code
            0 ];        // terminator

        let buf = [0; 1];
        let pal = [0; 3 * 2];
        let raster = Raster::new(1, 1, &buf, &pal);

        let mut w = Vec::new();
        compress(&raster, &mut w).unwrap();

        assert_eq!(&w[..], &expected[..]);
    }

    #[test]
    fn test_code_sequence_repeated_pixels() {
        // "aaaa" compresses to: clear, a, <a,a>, a, EOF.
        let buf = [7, 7, 7, 7];
        let pal = [0; 3 * 8];
        let raster = Raster::new(4, 1, &buf, &pal);

        let mut w = Vec::new();
        compress(&raster, &mut w).unwrap();

        let codes = read_codes(&w);
        assert_eq!(codes, vec![CLEAR_CODE, 7, 258, 7, EOF_CODE]);
    }

    #[test]
    fn test_code_sequence_distinct_pixels() {
        let buf = [1, 2, 3, 4];
        let pal = [0; 3 * 8];
        let raster = Raster::new(2, 2, &buf, &pal);

        let mut w = Vec::new();
        compress(&raster, &mut w).unwrap();

        let codes = read_codes(&w);
        assert_eq!(codes, vec![CLEAR_CODE, 1, 2, 3, 4, EOF_CODE]);
    }

    #[test]
    fn test_stream_shape() {
        // Deterministic pseudo-random pixels, enough to grow the
        // code width and force at least one dictionary clear.
        let mut buf = vec![0; 300 * 300];
        let mut seed: u32 = 1;
        for e in buf.iter_mut() {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            *e = ((seed >> 16) & 0x3F) as u8;
        }
        let pal = [0; 3 * 64];
        let raster = Raster::new(300, 300, &buf, &pal);

        let mut w = Vec::new();
        compress(&raster, &mut w).unwrap();

        let codes = read_codes(&w);
        assert_eq!(codes[0], CLEAR_CODE);
        assert_eq!(codes[codes.len() - 1], EOF_CODE);

        // The dictionary fills several times over for this input.
        let clears = codes.iter().filter(|&&c| c == CLEAR_CODE).count();
        assert!(clears > 1);
    }
}
