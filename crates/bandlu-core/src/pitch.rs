//! Moving band blocks between buffers with different leading dimensions.
//!
//! Host buffers are tightly pitched (`ldab = band_rows`). Device-side
//! buffers are padded so every column starts on an aligned boundary
//! (`lddab = round_up(band_rows, align)`). These helpers play the role of the
//! set-matrix / get-matrix transfers around the factorization call.

use crate::dense;
use crate::error::{Error, Result};
use crate::scalar::BandScalar;

/// Round `value` up to the next multiple of `align` (`align == 0` is treated as 1).
pub fn round_up(value: usize, align: usize) -> usize {
    let align = align.max(1);
    value.div_ceil(align) * align
}

/// Copy a `rows × cols` column-major block from `src` (pitch `lds`) into
/// `dst` (pitch `ldd`). Rows of `dst` beyond `rows` are left untouched.
pub fn copy_block<T: Copy>(
    rows: usize,
    cols: usize,
    src: &[T],
    lds: usize,
    dst: &mut [T],
    ldd: usize,
) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Ok(());
    }
    if lds < rows || ldd < rows {
        return Err(Error::LeadingDimension {
            ldab: lds.min(ldd),
            required: rows,
        });
    }
    let need = |ld: usize| (cols - 1) * ld + rows;
    if src.len() < need(lds) {
        return Err(Error::BufferTooShort {
            expected: need(lds),
            actual: src.len(),
        });
    }
    if dst.len() < need(ldd) {
        return Err(Error::BufferTooShort {
            expected: need(ldd),
            actual: dst.len(),
        });
    }

    for j in 0..cols {
        dst[j * ldd..j * ldd + rows].copy_from_slice(&src[j * lds..j * lds + rows]);
    }
    Ok(())
}

/// Allocate a zeroed `ldd × cols` buffer and copy a `rows × cols` block into it.
pub fn to_pitch<T: BandScalar>(
    rows: usize,
    cols: usize,
    src: &[T],
    lds: usize,
    ldd: usize,
) -> Result<Vec<T>> {
    let len = ldd
        .checked_mul(cols)
        .ok_or(Error::SizeOverflow("pitched buffer length"))?;
    let mut dst = dense::zeroed_vec::<T>(len)?;
    copy_block(rows, cols, src, lds, &mut dst, ldd)?;
    log::debug!(
        "staged {}x{} block from pitch {} to pitch {} ({} elements)",
        rows,
        cols,
        lds,
        ldd,
        len
    );
    Ok(dst)
}
