use std::io::{self, Read};

#[inline(always)]
pub(crate) const unsafe fn slice_to_array_at<T, const N: usize>(slice: &[T], index: usize) -> &[T; N] {
    &*(slice.as_ptr().add(index) as *const [T; N])
}
#[inline(always)]
pub(crate) unsafe fn slice_to_array_at_mut<T, const N: usize>(slice: &mut [T], index: usize) -> &mut [T; N] {
    &mut *(slice.as_mut_ptr().add(index) as *mut [T; N])
}

/// Converts a size in bytes to a human-readable string.
pub fn human_readable_size(size: usize) -> String {
    let mut cal_size = size;
    let mut unit = 0;
    while cal_size >= 1024 {
        cal_size >>= 10;
        unit += 1;
    }
    let unit = match unit {
        0 => "B",
        1 => "KiB",
        2 => "MiB",
        3 => "GiB",
        4 => "TiB",
        5 => "PiB",
        6 => "EiB",
        _ => {
            cal_size = size;
            "B"
        },
    };
    format!("{} {}", cal_size, unit)
}

/// Reads from `reader` until `buf` is full or the reader reports EOF.
///
/// Returns the number of bytes placed in `buf`. A count smaller than
/// `buf.len()` means EOF was reached. `Interrupted` reads are retried, every
/// other error is returned as is.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        const PATH_SEPARATORS: &[char] = &['/', '\\'];
    } else {
        const PATH_SEPARATORS: &[char] = &['/'];
    }
}

/// Strips every directory component from `name`.
///
/// A trailing separator yields an empty name: `basename("/usr/bin/") == ""`.
pub fn basename(name: &str) -> &str {
    match name.rfind(PATH_SEPARATORS) {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

#[cfg(feature = "variable_time_eq")]
#[inline(always)]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a == b
}

#[cfg(not(feature = "variable_time_eq"))]
#[inline(always)]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut x = 0u8;

    for i in 0..a.len() {
        x |= a[i] ^ b[i];
    }

    x == 0
}
