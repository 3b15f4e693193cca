//! Foreign function interface.

use std::ffi::CStr;
use std::io::Cursor;
use std::mem;
use std::path::Path;
use std::ptr;
use std::slice;
use libc::{c_char,c_uint,size_t};

use ::{GifEncoder,Raster};

/// Dummy opaque structure, equivalent to Raster<'a>.
pub struct CRaster;

// Print with "file:line - " prefix, for more informative error messages.
macro_rules! printerrorln {
    ($e:expr) => {
        println!("{}:{} - {}", file!(), line!(), $e);
    };
    ($fmt:expr, $arg:tt) => {
        print!("{}:{} - ", file!(), line!());
        println!($fmt, $arg);
    };
}

unsafe fn transmute_raster<'a>(src: *const CRaster)
        -> &'a Raster<'a> {
    let ptr: *const Raster = mem::transmute(src);
    &*ptr
}

/*--------------------------------------------------------------*/
/* Encoder                                                      */
/*--------------------------------------------------------------*/

/// Encode the raster as a GIF89a data stream into the given buffer.
///
/// Writes the stream length to `out_len`.  Returns 0 on success,
/// 1 on encoding failure, 2 if the output buffer is too small (in
/// which case `out_len` holds the required size).
#[no_mangle]
pub extern "C" fn gifenc_encode(
        raster: *const CRaster,
        out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint {
    if raster.is_null() || out_buf.is_null() || out_len.is_null() {
        printerrorln!("bad input parameters");
        return 1;
    }

    let raster = unsafe{ transmute_raster(raster) };
    let mut buf: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    match ::encode(raster, &mut buf) {
        Ok(_) => {
            let len = buf.get_ref().len();
            unsafe{ ptr::write(out_len, len) };
            if len <= max_len {
                let dst_slice = unsafe{ slice::from_raw_parts_mut(out_buf, max_len) };
                dst_slice[0..len].copy_from_slice(&buf.get_ref()[..]);
                return 0;
            } else {
                printerrorln!("output buffer too small");
                return 2;
            }
        },
        Err(e) => {
            printerrorln!(e);
            return 1;
        },
    }
}

/// Encode the raster as a GIF89a file.
///
/// Returns 0 on success.
#[no_mangle]
pub extern "C" fn gifenc_encode_to_file(
        filename: *const c_char, raster: *const CRaster)
        -> c_uint {
    if filename.is_null() || raster.is_null() {
        printerrorln!("bad input parameters");
        return 1;
    }

    let cstr = unsafe{ CStr::from_ptr(filename) };
    let filename = match cstr.to_str() {
        Ok(s) => Path::new(s),
        Err(e) => {
            printerrorln!(e);
            return 1;
        },
    };

    let raster = unsafe{ transmute_raster(raster) };
    match GifEncoder::new().encode_to_file(filename, raster) {
        Ok(_) => 0,
        Err(e) => {
            printerrorln!(e);
            return 1;
        },
    }
}

/*--------------------------------------------------------------*/
/* Raster                                                       */
/*--------------------------------------------------------------*/

/// Allocate a new raster.
#[no_mangle]
pub extern "C" fn gifenc_raster_alloc(
        x: size_t, y: size_t, w: size_t, h: size_t, stride: size_t,
        buf: *const u8, buf_len: size_t,
        pal: *const u8, pal_len: size_t)
        -> *mut CRaster {
    if buf.is_null() || pal.is_null() {
        printerrorln!("bad input parameters");
        return ptr::null_mut();
    }

    let buf_slice = unsafe{ slice::from_raw_parts(buf, buf_len) };
    let pal_slice = unsafe{ slice::from_raw_parts(pal, pal_len) };
    let raster = Raster::with_offset(x, y, w, h, stride, buf_slice, pal_slice);
    let rptr = Box::into_raw(Box::new(raster));
    let cptr: *mut CRaster = unsafe{ mem::transmute(rptr) };
    cptr
}

/// Free a previously allocated raster.
#[no_mangle]
pub extern "C" fn gifenc_raster_free(raster: *mut CRaster) {
    if raster.is_null() {
        return;
    }

    let rptr: *mut Raster = unsafe{ mem::transmute(raster) };
    let _raster = unsafe{ Box::from_raw(rptr) };
}
