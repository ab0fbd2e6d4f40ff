pub mod digest;
pub mod ed2k;
pub mod md4;
