//! GridToGif - render a height field to a GIF file.
//!
//! Evaluates a simple analytic surface over a grid, maps the heights
//! through a 64-entry color ramp and writes the result as out.gif in
//! the current directory.

extern crate gifenc;

use std::path::Path;

const SCREEN_W: usize = 256;
const SCREEN_H: usize = 256;
const NUM_COLS: usize = 64;

/// Build a blue-green-brown-white elevation ramp.
fn make_palette() -> Vec<u8> {
    let mut pal = Vec::with_capacity(3 * NUM_COLS);

    for i in 0..NUM_COLS {
        let t = i as f64 / (NUM_COLS - 1) as f64;
        let (r, g, b) = if t < 0.25 {
            (0.0, 0.2 + 2.0 * t, 0.5 + 2.0 * t)
        } else if t < 0.6 {
            (0.1, 0.5 + 0.4 * t, 0.1)
        } else if t < 0.85 {
            (0.4 + 0.4 * t, 0.3 + 0.3 * t, 0.2)
        } else {
            (t, t, t)
        };

        pal.push((255.0 * r.min(1.0)) as u8);
        pal.push((255.0 * g.min(1.0)) as u8);
        pal.push((255.0 * b.min(1.0)) as u8);
    }

    pal
}

/// Sample the surface on a grid and quantize to palette indices.
fn make_height_field() -> Vec<u8> {
    let mut buf = vec![0; SCREEN_W * SCREEN_H];

    for py in 0..SCREEN_H {
        for px in 0..SCREEN_W {
            let fx = px as f64 / SCREEN_W as f64 * 8.0;
            let fy = py as f64 / SCREEN_H as f64 * 8.0;
            let z = (fx.sin() * fy.cos() + (0.5 * fx * fy).sin()) * 0.25 + 0.5;

            let i = (z * (NUM_COLS - 1) as f64).round();
            buf[SCREEN_W * py + px] = i.max(0.0).min((NUM_COLS - 1) as f64) as u8;
        }
    }

    buf
}

fn main() {
    let pal = make_palette();
    let buf = make_height_field();
    let raster = gifenc::Raster::new(SCREEN_W, SCREEN_H, &buf, &pal);

    let mut enc = gifenc::GifEncoder::new();
    enc.set_comment("gridtogif demo");

    match enc.encode_to_file(Path::new("out.gif"), &raster) {
        Ok(_) => println!("wrote out.gif ({}x{})", SCREEN_W, SCREEN_H),
        Err(e) => println!("Error: {}", e),
    }
}
