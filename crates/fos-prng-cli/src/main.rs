//! fos-prng: diagnostic front end for the shared random byte stream.
//!
//! Prints COUNT (default 16) bytes as hex, one temp file name, or one
//! random row id. Logs go to stderr; set `RUST_LOG=debug` to see seeding.

use anyhow::{Context, Result};
use clap::Parser;
use fos_prng::{ByteStream, DEFAULT_TEMP_PREFIX, PrngConfig};
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Use mimalloc as the global allocator, same as the browser binary
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_COUNT: usize = 16;

#[derive(Debug, Parser)]
#[command(name = "fos-prng", version, about = "Read from the shared random byte stream")]
struct Args {
    /// Number of bytes to print as hex
    #[arg(value_name = "COUNT", conflicts_with_all = ["temp_name", "rowid"])]
    count: Option<usize>,

    /// Build the stream from a JSON config file instead of OS entropy
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print one temporary file name
    #[arg(long, conflicts_with = "rowid")]
    temp_name: bool,

    /// Print one random row id
    #[arg(long)]
    rowid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Hex(usize),
    TempName,
    Rowid,
}

impl Args {
    fn output(&self) -> Output {
        if self.temp_name {
            Output::TempName
        } else if self.rowid {
            Output::Rowid
        } else {
            Output::Hex(self.count.unwrap_or(DEFAULT_COUNT))
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}

fn run(output: Output, stream: &ByteStream) -> Result<String> {
    let line = match output {
        Output::Hex(count) => {
            let mut buf = vec![0u8; count];
            stream.fill_random_bytes(&mut buf)?;
            to_hex(&buf)
        }
        Output::TempName => fos_prng::temp_file_name(stream, DEFAULT_TEMP_PREFIX)?,
        Output::Rowid => fos_prng::random_rowid(stream)?.to_string(),
    };
    Ok(line)
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args = Args::parse();

    let line = match &args.config {
        Some(path) => {
            let config = PrngConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            info!(path = %path.display(), "Using configured random stream");
            let stream = config.build()?;
            run(args.output(), &stream)?
        }
        None => run(args.output(), ByteStream::global())?,
    };

    println!("{line}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use fos_prng::FixedKey;
    use std::path::Path;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("fos-prng").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.output(), Output::Hex(DEFAULT_COUNT));
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_options() {
        let parsed = args(&["32", "--config", "prng.json"]).unwrap();
        assert_eq!(parsed.output(), Output::Hex(32));
        assert_eq!(parsed.config.as_deref(), Some(Path::new("prng.json")));

        assert_eq!(args(&["--rowid"]).unwrap().output(), Output::Rowid);
        assert_eq!(args(&["--temp-name"]).unwrap().output(), Output::TempName);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(args(&["--bogus"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert_eq!(args(&["many"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn test_output_modes_conflict() {
        for list in [
            &["8", "--rowid"][..],
            &["8", "--temp-name"][..],
            &["--temp-name", "--rowid"][..],
        ] {
            assert_eq!(
                args(list).unwrap_err().kind(),
                ErrorKind::ArgumentConflict,
                "{list:?}"
            );
        }
    }

    #[test]
    fn test_run_hex_fixture() {
        let stream = ByteStream::new(FixedKey::identity());
        let parsed = args(&["4"]).unwrap();
        assert_eq!(run(parsed.output(), &stream).unwrap(), "196b2867");
    }

    #[test]
    fn test_run_zero_count() {
        let stream = ByteStream::new(FixedKey::identity());
        let parsed = args(&["0"]).unwrap();
        assert_eq!(run(parsed.output(), &stream).unwrap(), "");
        assert!(!stream.is_seeded());
    }
}
