//! GIF encoder error codes.

use std::io;

pub type GifResult<T> = Result<T, GifError>;

quick_error! {
    #[derive(Debug)]
    pub enum GifError {
        /// The palette holds more entries than the global color
        /// table can describe.
        PaletteTooLarge(ncols: usize) {
            description("palette too large")
            display("Palette has {} entries, limit is 256", ncols)
        }

        /// A pixel references a palette entry that does not exist.
        InvalidPixelIndex(index: u8, ncols: usize) {
            description("invalid pixel index")
            display("Pixel index {} outside palette of {} entries",
                    index, ncols)
        }

        /// Raster dimensions outside the range the file format can
        /// represent.
        WrongResolution {
            description("wrong resolution")
            display("Wrong resolution")
        }

        /// IO error.
        Io(err: io::Error) {
            from()
            cause(err)
            description("io error")
            display("IO error: {}", err)
        }
    }
}
