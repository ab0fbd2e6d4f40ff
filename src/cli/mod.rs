//! `md4sum` command line: option parsing and exit status.

mod run;

pub use run::run;

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::manifest::LINE_LENGTH;

pub const PROGRAM: &str = "md4sum";

/// Highest meaningful `-v` level.
pub const VERBOSE_LEVEL_MAX: u8 = 2;

/// Whether filenames are printed next to digests when `-n` is not given.
pub const DEFAULT_NAMES: bool = false;

/// Process exit classification, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Ok,
    /// At least one digest did not verify.
    Failed,
    Bug,
    /// Usage error, unreadable input or malformed check file.
    Error,
}

impl Outcome {
    pub const fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Failed => 1,
            Self::Bug => 2,
            Self::Error => 3,
        }
    }

    /// Keeps the more severe of the two.
    #[inline]
    pub fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub check: bool,
    pub ed2k: bool,
    pub names: bool,
    pub verbose: u8,
    /// Files to digest, or in check mode the check file (first operand only).
    pub inputs: Vec<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            check: false,
            ed2k: false,
            names: DEFAULT_NAMES,
            verbose: 0,
            inputs: Vec::new(),
        }
    }
}

/// Version line followed by the compile-time settings.
pub fn version_text() -> String {
    format!(
        "v{}\ncompilation settings:\n  DEFAULT_NAMES:  {}\n  LINE_LENGTH  :  {LINE_LENGTH}",
        clap::crate_version!(),
        u8::from(DEFAULT_NAMES),
    )
}

pub fn command() -> Command {
    Command::new(PROGRAM)
        .version(version_text())
        .long_version(version_text())
        .about("Generate or check MD4 message digests.")
        .arg(
            Arg::new("check")
                .short('c')
                .action(ArgAction::SetTrue)
                .help("check message digest(s)"),
        )
        .arg(
            Arg::new("ed2k")
                .short('e')
                .action(ArgAction::SetTrue)
                .help("print ed2k link instead of MD4 sum"),
        )
        .arg(
            Arg::new("names")
                .short('n')
                .action(ArgAction::SetTrue)
                .help(if DEFAULT_NAMES {
                    "don't print filename(s) with message digest(s)"
                } else {
                    "print filename(s) with message digest(s)"
                }),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("raise verbosity level on stderr (max 2)"),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .num_args(0..)
                .help("input file(s), or the check file with -c; '-' is stdin"),
        )
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            check: matches.get_flag("check"),
            ed2k: matches.get_flag("ed2k"),
            names: DEFAULT_NAMES ^ matches.get_flag("names"),
            verbose: matches.get_count("verbose").min(VERBOSE_LEVEL_MAX),
            inputs: matches
                .get_many::<PathBuf>("files")
                .map(|files| files.cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}
