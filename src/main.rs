use std::io::{self, Write};
use std::process::ExitCode;

use md4sum::cli::{self, Options, Outcome};

fn main() -> ExitCode {
    let opts = match Options::try_parse_from(std::env::args_os()) {
        Ok(opts) => opts,
        Err(err) => {
            // -h and -V land here too and are not failures.
            let outcome = if err.use_stderr() { Outcome::Error } else { Outcome::Ok };
            let _ = err.print();
            return ExitCode::from(outcome.code());
        }
    };

    md4sum::logging::init_tracing(opts.verbose);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    let outcome = cli::run(&opts, &mut out, &mut err);
    let _ = out.flush();

    tracing::debug!(?outcome, "done");
    ExitCode::from(outcome.code())
}
