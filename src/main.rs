use clap::{Parser, Subcommand};
use core::cmp::Ordering;
use fontver::{sort_descending, PatternError, Version, VersionError, VersionPattern};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Version(#[from] VersionError),

    #[error("{0}")]
    Pattern(#[from] PatternError),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Commands {
    /// Parses version strings and prints their canonical form, one per line
    Parse {
        /// The version strings to parse
        #[arg(required = true)]
        versions: Vec<String>,

        /// Parse in loose mode: absent components become wildcards instead
        /// of zero
        #[arg(short, long)]
        loose: bool,

        /// A unique-identifier string to recover a build tag from when a
        /// version string carries none
        #[arg(short, long, value_name = "IDENTIFIER", conflicts_with = "loose")]
        identifier: Option<String>,
    },

    /// Compares two versions, printing -1, 0, or 1
    Compare {
        /// The left-hand version
        a: String,

        /// The right-hand version
        b: String,
    },

    /// Sorts versions most-recent-first and prints them, one per line
    Sort {
        /// The version strings to sort
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Selects the version matching a pattern from a list.
    ///
    /// The versions are sorted most-recent-first before matching, so the
    /// newest satisfying version wins. Prints the matched version's position
    /// in the sorted list and its canonical form. Exits with status 1 when
    /// nothing matches, which is an outcome, not an error.
    Match {
        /// The pattern, e.g. '>=2.3', 'latest', or '*'
        pattern: String,

        /// The candidate version strings
        #[arg(required = true)]
        versions: Vec<String>,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    }
}

fn parse_all(versions: &[String]) -> Result<Vec<Version>, VersionError> {
    versions.iter().map(|s| Version::parse(s)).collect()
}

fn do_work(cli: Cli) -> Result<Output, CliError> {
    match cli.command {
        Commands::Parse {
            versions,
            loose,
            identifier,
        } => {
            let mut lines = Vec::with_capacity(versions.len());
            for input in &versions {
                let version = if loose {
                    Version::parse_loose(input)?
                } else if let Some(identifier) = &identifier {
                    fontver::parse_with_identifier(input, identifier)?
                } else {
                    Version::parse(input)?
                };
                lines.push(version.to_string());
            }
            Ok((lines.join("\n"), 0))
        }

        Commands::Compare { a, b } => {
            let a = Version::parse(&a)?;
            let b = Version::parse(&b)?;
            let result = match a.compare(&b) {
                Ordering::Less => "-1",
                Ordering::Equal => "0",
                Ordering::Greater => "1",
            };
            Ok((result.to_string(), 0))
        }

        Commands::Sort { versions } => {
            let mut parsed = parse_all(&versions)?;
            sort_descending(&mut parsed);
            let lines: Vec<String> = parsed.iter().map(|v| v.to_string()).collect();
            Ok((lines.join("\n"), 0))
        }

        Commands::Match { pattern, versions } => {
            let pattern: VersionPattern = pattern.parse()?;
            let mut parsed = parse_all(&versions)?;
            sort_descending(&mut parsed);
            match pattern.find(&parsed) {
                Some((index, version)) => Ok((format!("{index}\t{version}"), 0)),
                None => Ok(("no match".to_string(), 1)),
            }
        }
    }
}
