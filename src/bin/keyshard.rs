use clap::{crate_version, Parser, Subcommand};

use std::error::Error;
use std::path::PathBuf;
use tracing::debug;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use keyshard::alphabet;
use keyshard::config::KeyshardConfig;
use keyshard::sss::Scheme;
use keyshard::util::{read_secret_file, read_share_file, write_share_file};

#[derive(Debug, Subcommand)]
enum CliArgument {
    /// Split a secret into shares.
    Split {
        /// Number of shares to produce; defaults to the config file.
        #[clap(long, short = 'n')]
        shares: Option<usize>,

        /// Number of shares needed to recover; defaults to the config file.
        #[clap(long, short = 'k')]
        threshold: Option<usize>,

        /// Secret to split.
        #[clap(long, required_unless_present = "file", conflicts_with = "file")]
        secret: Option<String>,

        /// Read the secret from the first line of this file.
        #[clap(long, short)]
        file: Option<PathBuf>,

        /// Write the shares to this file instead of printing them.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Recover a secret from shares.
    Recover {
        /// Shares to combine.
        #[clap(required_unless_present = "file", conflicts_with = "file")]
        shares: Vec<String>,

        /// Read the shares from this file, one per line.
        #[clap(long, short)]
        file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "keyshard")]
#[command(version = crate_version!())]
#[command(
    about = "Split base58 secrets into Shamir shares and recover them",
    long_about = "keyshard splits an alphanumeric secret, such as a Bitcoin private key, into n shares of which any k recover it. Secrets and shares use the base58 alphabet plus the digit 0: alphanumerics other than l, I and O. Shares are printed one per line, the same format share files are read in. An optional password is mixed into the secret before splitting and must be given again to recover. Note that recovering with fewer than k shares, or with the wrong password, silently produces a wrong secret."
)]
struct Opt {
    /// Password mixed into the secret.
    #[clap(long, short, env = "KEYSHARD_PASSWORD", hide_env_values = true, default_value = "")]
    password: String,

    /// Config file with defaults for `split`.
    #[clap(long, short)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[clap(subcommand)]
    argument: CliArgument,
}

fn main() -> Result<(), Box<dyn Error>> {
    // stdout carries shares only; notices go to stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .with_writer(std::io::stderr)
        .try_init();

    let opt = Opt::parse();
    if let Err(e) = run(opt) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

/// Builds the log filter from `RUST_LOG` style directives, showing warnings
/// when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn run(opt: Opt) -> Result<(), Box<dyn Error>> {
    let scheme = Scheme::new()?;

    match opt.argument {
        CliArgument::Split {
            shares,
            threshold,
            secret,
            file,
            output,
        } => {
            let config = KeyshardConfig::load(opt.config.as_deref())?;
            let shares = shares
                .or(config.shares)
                .ok_or("number of shares not given and not configured")?;
            let threshold = threshold
                .or(config.threshold)
                .ok_or("threshold not given and not configured")?;
            debug!("Using shares: {}, threshold: {}", shares, threshold);

            let secret = match (secret, file) {
                (Some(secret), _) => secret,
                (None, Some(path)) => read_secret_file(&path)?,
                (None, None) => return Err("no secret given".into()),
            };
            if let Some((position, symbol)) = alphabet::find_invalid(&secret) {
                return Err(format!(
                    "your input secret has the illegal character {symbol:?} at position {position}; \
                     use alphanumerics other than l, I and O"
                )
                .into());
            }

            let split_shares = scheme.split(shares, threshold, &secret, &opt.password)?;
            match output {
                Some(path) => {
                    write_share_file(&path, &split_shares)?;
                    println!(
                        "✂️  Secret has been split into {} shares in {}",
                        split_shares.len(),
                        path.display()
                    );
                }
                None => {
                    for share in &split_shares {
                        println!("{}", share);
                    }
                }
            }
        }
        CliArgument::Recover { shares, file } => {
            let shares = match file {
                Some(path) => read_share_file(&path)?,
                None => shares,
            };
            debug!("Recovering from {} shares", shares.len());
            for (index, share) in shares.iter().enumerate() {
                if let Some((position, symbol)) = alphabet::find_invalid(share) {
                    return Err(format!(
                        "share {index} has the illegal character {symbol:?} at position {position}; \
                         use alphanumerics other than l, I and O"
                    )
                    .into());
                }
            }

            let secret = scheme.recover(&shares, &opt.password)?;
            println!("{}", secret);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_shown_by_default() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_directives_override_default() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter("error").max_level_hint(), Some(LevelFilter::ERROR));
    }
}
