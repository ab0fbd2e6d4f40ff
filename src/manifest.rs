//! Check files: one `<32 hex digits><blanks><filename>` entry per line.
//!
//! Leading blanks are ignored, `#` starts a comment line and the first empty
//! line ends the list.

use std::io::{self, BufRead, Read};
use std::path::PathBuf;

use crate::crypto::hash::digest::Digest;

/// Line buffer size. Lines must fit in it with their terminator, so the
/// longest accepted line holds `LINE_LENGTH - 1` bytes, `\n` included.
pub const LINE_LENGTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub digest: Digest,
    pub path: PathBuf,
    /// 1-based line number in the check file.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Entry { digest: Digest, path: PathBuf },
    Comment,
    End,
}

#[derive(Debug)]
pub enum ManifestError {
    Io(io::Error),
    LineTooLong { line: usize },
    MalformedDigest { line: usize, token: String },
    MissingFilename { line: usize },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(source) => write!(f, "cannot read check file: {source}"),
            Self::LineTooLong { line } => {
                write!(f, "line {line}: not shorter than {LINE_LENGTH} bytes")
            }
            Self::MalformedDigest { line, token } => {
                write!(f, "line {line}: not an MD4 message digest '{token}'")
            }
            Self::MissingFilename { line } => write!(f, "line {line}: invalid filename ''"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::LineTooLong { .. } | Self::MalformedDigest { .. } | Self::MissingFilename { .. } => {
                None
            }
        }
    }
}

impl From<io::Error> for ManifestError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[inline(always)]
fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn trim_blanks(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_blank(b)).unwrap_or(bytes.len());
    &bytes[start..]
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn path_from_bytes(bytes: &[u8]) -> PathBuf {
            use std::os::unix::ffi::OsStrExt;
            PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
        }
    } else {
        fn path_from_bytes(bytes: &[u8]) -> PathBuf {
            PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Classifies one line (without its terminator).
pub fn parse_line(text: &[u8], line: usize) -> Result<Line, ManifestError> {
    let rest = trim_blanks(text);
    match rest.first() {
        None => return Ok(Line::End),
        Some(b'#') => return Ok(Line::Comment),
        Some(_) => {}
    }

    let malformed = || {
        let end = rest.iter().position(|&b| is_blank(b)).unwrap_or(rest.len());
        ManifestError::MalformedDigest {
            line,
            token: String::from_utf8_lossy(&rest[..end]).into_owned(),
        }
    };

    let token = rest.get(..Digest::HEX_LEN).ok_or_else(malformed)?;
    let token = std::str::from_utf8(token).map_err(|_| malformed())?;
    let digest = Digest::from_hex(token).map_err(|_| malformed())?;

    let after = &rest[Digest::HEX_LEN..];
    match after.first() {
        None => return Err(ManifestError::MissingFilename { line }),
        Some(&b) if !is_blank(b) => return Err(malformed()),
        Some(_) => {}
    }
    let path = trim_blanks(after);
    if path.is_empty() {
        return Err(ManifestError::MissingFilename { line });
    }

    Ok(Line::Entry {
        digest,
        path: path_from_bytes(path),
    })
}

/// Iterator over the entries of a check file.
///
/// Stops at the first empty line, at EOF, or after yielding an error.
pub struct Manifest<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> Manifest<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(LINE_LENGTH),
            line: 0,
            done: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<Entry>, ManifestError> {
        loop {
            self.buf.clear();
            let n = (&mut self.reader)
                .take(LINE_LENGTH as u64)
                .read_until(b'\n', &mut self.buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;
            if n >= LINE_LENGTH {
                return Err(ManifestError::LineTooLong { line: self.line });
            }

            let mut raw = &self.buf[..];
            if let Some(stripped) = raw.strip_suffix(b"\n") {
                raw = stripped;
            }
            if let Some(stripped) = raw.strip_suffix(b"\r") {
                raw = stripped;
            }
            match parse_line(raw, self.line)? {
                Line::Comment => continue,
                Line::End => return Ok(None),
                Line::Entry { digest, path } => {
                    tracing::trace!(line = self.line, %digest, path = %path.display(), "check file entry");
                    return Ok(Some(Entry {
                        digest,
                        path,
                        line: self.line,
                    }));
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for Manifest<R> {
    type Item = Result<Entry, ManifestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_line() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
