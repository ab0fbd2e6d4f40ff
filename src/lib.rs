//! MD4 message digests (RFC 1320) and the ed2k block-chained hash built on
//! top of them, plus the pieces the `md4sum` tool needs around the core:
//! hex rendering, check-file parsing and the command-line driver.
//!
//! MD4 is cryptographically broken. It is provided here for legacy content
//! identification only.

pub mod cli;
pub mod crypto;
pub mod encoding;
pub mod logging;
pub mod manifest;
pub mod utils;

pub use crypto::hash::digest::Digest;
pub use crypto::hash::ed2k::{Ed2k, Ed2kDigest};
pub use crypto::hash::md4::Md4;

/// Runs `$e` with `$i` bound to `$start..$start + $count`.
#[macro_export]
macro_rules! const_loop {
    ($i:ident, $start:expr, $count:expr, $e:block) => {{
        let mut $i: usize = $start;
        while $i < $start + $count {
            $e
            $i += 1;
        }
    }};
}
