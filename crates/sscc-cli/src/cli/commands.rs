use std::io::Write;

use anyhow::{Context, bail};
use sscc::{
    AtomicSsccGenerator, CounterStore, Error, FileCounter, Sscc, SsccGenerator, SsccLayout,
};

use crate::cli::config::{Command, Config};

/// Runs the configured command, writing its results to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    match &config.command {
        Command::Init { start, force } => init(config, *start, *force, out),
        Command::Show => show(config, out),
        Command::Next { count, hri } => next(config, *count, *hri, out),
        Command::Check { codes } => check(&config.layout, codes, out),
    }
}

fn init(config: &Config, start: u64, force: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let store = FileCounter::initialize(&config.counter_file, start, force)
        .with_context(|| format!("failed to initialize {}", config.counter_file.display()))?;
    tracing::info!(path = %store.path().display(), start, "Counter initialized");
    writeln!(out, "{start}")?;
    Ok(())
}

fn show(config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let store = FileCounter::new(&config.counter_file);
    let counter = store.get_counter().map_err(|e| counter_error(config, e))?;
    writeln!(out, "counter\t{counter}")?;
    match config.layout.build(counter) {
        Ok(code) => writeln!(out, "next\t{code}")?,
        Err(Error::SerialOverflow { .. }) => writeln!(out, "next\texhausted")?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn next(config: &Config, count: usize, hri: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let generator =
        AtomicSsccGenerator::with_layout(FileCounter::new(&config.counter_file), config.layout);

    let batch = generator.generate_batch(count);
    for code in batch.codes() {
        if hri {
            writeln!(out, "{}", code.to_hri())?;
        } else {
            writeln!(out, "{code}")?;
        }
    }

    match batch.into_parts() {
        (_, None) => Ok(()),
        (codes, Some(e)) if codes.is_empty() => Err(counter_error(config, e)),
        (codes, Some(e)) => bail!("generated {} of {count} codes: {e}", codes.len()),
    }
}

fn check(layout: &SsccLayout, codes: &[String], out: &mut impl Write) -> anyhow::Result<()> {
    let mut invalid = 0;
    for raw in codes {
        match Sscc::parse(raw.trim()) {
            Ok(code) if code.layout() == *layout => {
                writeln!(out, "{raw}\tok\tserial={}", code.serial_reference())?;
            }
            Ok(code) => {
                writeln!(
                    out,
                    "{raw}\tok\tserial={}\tforeign layout {}/{}",
                    code.serial_reference(),
                    code.extension_digit(),
                    code.company_prefix()
                )?;
            }
            Err(e) => {
                invalid += 1;
                writeln!(out, "{raw}\tinvalid\t{e}")?;
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} codes are invalid", codes.len());
    }
    Ok(())
}

fn counter_error(config: &Config, err: Error) -> anyhow::Error {
    let path = config.counter_file.display();
    match err {
        Error::CounterMissing => {
            anyhow::Error::new(err).context(format!("no counter at {path}; run `sscc init` first"))
        }
        err => anyhow::Error::new(err).context(format!("counter at {path} cannot issue codes")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use sscc::MAX_SERIAL_REFERENCE;

    use super::*;
    use crate::cli::config::LogFormat;

    fn config(path: &Path, command: Command) -> Config {
        Config {
            counter_file: path.to_path_buf(),
            layout: SsccLayout::default(),
            log_format: LogFormat::Pretty,
            command,
        }
    }

    fn run_to_string(config: &Config) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let res = run(config, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn init_then_next_issues_sequential_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");

        let (res, out) = run_to_string(&config(&path, Command::Init { start: 0, force: false }));
        res.unwrap();
        assert_eq!(out, "0\n");

        let (res, out) = run_to_string(&config(&path, Command::Next { count: 2, hri: false }));
        res.unwrap();
        assert_eq!(out, "008596570000000006\n008596570000000013\n");

        let (res, out) = run_to_string(&config(&path, Command::Show));
        res.unwrap();
        assert!(out.starts_with("counter\t2\nnext\t00859657000000002"));
    }

    #[test]
    fn next_prints_hri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        FileCounter::initialize(&path, 0, false).unwrap();

        let (res, out) = run_to_string(&config(&path, Command::Next { count: 1, hri: true }));
        res.unwrap();
        assert_eq!(out, "(00) 8 59657 000000000 6\n");
    }

    #[test]
    fn next_without_counter_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.counter");

        let (res, out) = run_to_string(&config(&path, Command::Next { count: 3, hri: false }));
        let err = res.unwrap_err();
        assert!(out.is_empty());
        assert!(err.to_string().contains("run `sscc init` first"));
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::CounterMissing));
    }

    #[test]
    fn next_reports_partial_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        FileCounter::initialize(&path, MAX_SERIAL_REFERENCE, false).unwrap();

        let (res, out) = run_to_string(&config(&path, Command::Next { count: 3, hri: false }));
        assert_eq!(out.lines().count(), 1);
        assert!(res.unwrap_err().to_string().starts_with("generated 1 of 3 codes"));

        let (res, out) = run_to_string(&config(&path, Command::Show));
        res.unwrap();
        assert!(out.ends_with("next\texhausted\n"));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        FileCounter::initialize(&path, 42, false).unwrap();

        let (res, _) = run_to_string(&config(&path, Command::Init { start: 0, force: false }));
        assert!(res.is_err());
        assert_eq!(FileCounter::new(&path).get_counter(), Ok(42));

        let (res, _) = run_to_string(&config(&path, Command::Init { start: 0, force: true }));
        res.unwrap();
        assert_eq!(FileCounter::new(&path).get_counter(), Ok(0));
    }

    #[test]
    fn check_flags_invalid_codes() {
        let dir = tempfile::tempdir().unwrap();
        let foreign = SsccLayout::new(3, "01234").unwrap().build(77).unwrap();
        let codes = vec![
            "008596570000000006".to_owned(),
            "008596570000000007".to_owned(),
            foreign.to_string(),
        ];

        let (res, out) = run_to_string(&config(
            &dir.path().join("unused"),
            Command::Check { codes },
        ));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "008596570000000006\tok\tserial=0");
        assert!(lines[1].starts_with("008596570000000007\tinvalid\tcheck digit mismatch"));
        assert!(lines[2].ends_with("foreign layout 3/01234"));
        assert_eq!(res.unwrap_err().to_string(), "1 of 3 codes are invalid");
    }
}
