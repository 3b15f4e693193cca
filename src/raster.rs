//! Raster implementation.

use ::Raster;

impl<'a> Raster<'a> {
    /// Allocate a new raster for the given screen buffer and palette
    /// memory slices.
    ///
    /// The palette holds RGB triples; its length must be a multiple
    /// of 3.  Note that palettes larger than 256 entries are only
    /// rejected when encoding starts.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// const NUM_COLS: usize = 256;
    /// let buf = [0; SCREEN_W * SCREEN_H];
    /// let pal = [0; 3 * NUM_COLS];
    ///
    /// gifenc::Raster::new(SCREEN_W, SCREEN_H, &buf, &pal);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a [u8], pal: &'a [u8])
            -> Self {
        Self::with_offset(0, 0, w, h, w, buf, pal)
    }

    /// Allocate a new raster for the given screen buffer and palette
    /// memory slices, with an offset and stride.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// const NUM_COLS: usize = 256;
    /// let buf = [0; SCREEN_W * SCREEN_H];
    /// let pal = [0; 3 * NUM_COLS];
    ///
    /// gifenc::Raster::with_offset(0, 0, SCREEN_W, SCREEN_H, SCREEN_W, &buf, &pal);
    /// ```
    pub fn with_offset(
            x: usize, y: usize, w: usize, h: usize, stride: usize,
            buf: &'a [u8], pal: &'a [u8])
            -> Self {
        assert!(x + w <= stride);
        assert!(stride * (y + h) <= buf.len());
        assert!(pal.len() % 3 == 0);

        Raster {
            x: x,
            y: y,
            w: w,
            h: h,
            stride: stride,
            buf: buf,
            pal: pal,
        }
    }

    /// Number of palette entries.
    pub fn num_colors(&self) -> usize {
        self.pal.len() / 3
    }

    /// Slice containing the pixels of the given raster row.
    pub fn row(&self, py: usize) -> &[u8] {
        assert!(py < self.h);
        let start = self.stride * (self.y + py) + self.x;
        &self.buf[start..(start + self.w)]
    }
}

#[cfg(test)]
mod tests {
    use ::Raster;

    #[test]
    fn test_row_mapping() {
        let buf = [
            0, 1, 2, 3,
            4, 5, 6, 7,
            8, 9, 10, 11 ];
        let pal = [0; 3 * 4];

        let raster = Raster::with_offset(1, 1, 2, 2, 4, &buf, &pal);
        assert_eq!(raster.row(0), &[5, 6]);
        assert_eq!(raster.row(1), &[9, 10]);
    }

    #[test]
    fn test_num_colors() {
        let buf = [0; 4];
        let pal = [0; 3 * 7];

        let raster = Raster::new(2, 2, &buf, &pal);
        assert_eq!(raster.num_colors(), 7);
    }
}
