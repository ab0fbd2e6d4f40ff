use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};

use super::{Options, Outcome, PROGRAM};
use crate::crypto::hash::digest::Digest;
use crate::crypto::hash::{ed2k, md4};
use crate::manifest::{Entry, Manifest, ManifestError};

const STDIN_NAME: &str = "-";

struct Summary {
    digest: Digest,
    size: u64,
}

fn is_stdin(name: &Path) -> bool {
    name.as_os_str() == STDIN_NAME
}

fn describe(name: &Path) -> String {
    if is_stdin(name) {
        "stdin".to_string()
    } else {
        format!("file '{}'", name.display())
    }
}

fn open_input(name: &Path) -> anyhow::Result<Box<dyn Read>> {
    if is_stdin(name) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(name)
        .with_context(|| format!("Cannot open input file '{}'", name.display()))?;
    Ok(Box::new(file))
}

fn digest_input(name: &Path, use_ed2k: bool) -> anyhow::Result<Summary> {
    tracing::info!(
        "Generating {} for {}.",
        if use_ed2k { "ed2k link" } else { "MD4 digest" },
        describe(name)
    );

    let reader = open_input(name)?;
    let read_context = || format!("Cannot read '{}'", name.display());

    if !use_ed2k {
        let (digest, size) = md4::process(reader).with_context(read_context)?;
        return Ok(Summary { digest, size });
    }

    let result = ed2k::process(reader).with_context(read_context)?;
    for (i, block) in result.blocks().iter().enumerate() {
        tracing::debug!("ed2k-block {i:2}: {block}");
    }
    Ok(Summary {
        digest: result.digest(),
        size: result.size(),
    })
}

fn report<E: Write>(err: &mut E, error: &anyhow::Error) {
    tracing::debug!(error = ?error, "input failed");
    let _ = writeln!(err, "{PROGRAM}: {error:#}");
}

/// Runs the tool with parsed options. Digests and links go to `out`;
/// verification results and error messages go to `err`.
pub fn run<O: Write, E: Write>(opts: &Options, out: &mut O, err: &mut E) -> Outcome {
    if opts.check {
        check(opts, err)
    } else {
        generate(opts, out, err)
    }
}

fn generate<O: Write, E: Write>(opts: &Options, out: &mut O, err: &mut E) -> Outcome {
    let stdin_only = [PathBuf::from(STDIN_NAME)];
    let inputs: &[PathBuf] = if opts.inputs.is_empty() {
        &stdin_only
    } else {
        &opts.inputs
    };

    let mut outcome = Outcome::Ok;
    for name in inputs {
        let summary = match digest_input(name, opts.ed2k) {
            Ok(summary) => summary,
            Err(error) => {
                report(err, &error);
                outcome = outcome.merge(Outcome::Error);
                continue;
            }
        };

        let written = if opts.ed2k {
            writeln!(
                out,
                "{}",
                ed2k::link(
                    crate::utils::basename(&name.to_string_lossy()),
                    summary.size,
                    &summary.digest
                )
            )
        } else if opts.names {
            writeln!(out, "{}  {}", summary.digest, name.display())
        } else {
            writeln!(out, "{}", summary.digest)
        };

        if let Err(error) = written.context("Cannot write output") {
            report(err, &error);
            return Outcome::Error;
        }
    }
    outcome
}

fn check<E: Write>(opts: &Options, err: &mut E) -> Outcome {
    let manifest_name = opts
        .inputs
        .first()
        .map(PathBuf::as_path)
        .unwrap_or(Path::new(STDIN_NAME));
    let from_stdin = is_stdin(manifest_name);

    tracing::info!("Reading digest(s) from {}.", describe(manifest_name));

    let reader: Box<dyn BufRead> = if from_stdin {
        Box::new(io::stdin().lock())
    } else {
        match File::open(manifest_name) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(source) => {
                let error = anyhow::Error::new(source)
                    .context(format!("Cannot open digest file '{}'", manifest_name.display()));
                report(err, &error);
                return Outcome::Error;
            }
        }
    };

    let mut outcome = Outcome::Ok;
    for entry in Manifest::new(reader) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                // Lines that do not fit LINE_LENGTH are a limit of this tool,
                // not a defect in the check file.
                let severity = match source {
                    ManifestError::LineTooLong { .. } => Outcome::Bug,
                    _ => Outcome::Error,
                };
                let error = anyhow::Error::new(source)
                    .context(format!("Cannot use '{}'", manifest_name.display()));
                report(err, &error);
                return outcome.merge(severity);
            }
        };

        if from_stdin && is_stdin(&entry.path) {
            report(err, &anyhow!("Cannot read data AND digest from stdin!"));
            return outcome.merge(Outcome::Error);
        }

        outcome = outcome.merge(verify(&entry, opts.ed2k, err));
    }
    outcome
}

fn verify<E: Write>(entry: &Entry, use_ed2k: bool, err: &mut E) -> Outcome {
    let summary = match digest_input(&entry.path, use_ed2k) {
        Ok(summary) => summary,
        Err(error) => {
            report(err, &error);
            return Outcome::Error;
        }
    };

    if summary.digest.ct_eq(&entry.digest) {
        let _ = writeln!(err, "{PROGRAM}: MD4 check succeeded for '{}'.", entry.path.display());
        Outcome::Ok
    } else {
        tracing::debug!(expected = %entry.digest, actual = %summary.digest, line = entry.line, "digest mismatch");
        let _ = writeln!(err, "{PROGRAM}: MD4 check failed for '{}'.", entry.path.display());
        Outcome::Failed
    }
}
