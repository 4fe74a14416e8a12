// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Command line driver for the Pedersen secret sharing library.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use pedersen::io::schema::{self, CommitmentsRecord, GroupRecord, ShareRecord};
use pedersen::io::{self, FileFormat};
use pedersen::{Error, Group, Pedersen, Result};

#[derive(Parser)]
#[command(
    name = "pedersen",
    about = "Pedersen verifiable secret sharing",
    disable_version_flag = true
)]
struct Cli {
    /// logging level
    #[arg(long, global = true, default_value = "info")]
    loglevel: String,

    /// logging file ("stdout" or a path; logging is disabled when unset)
    #[arg(long, global = true)]
    logfile: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Pedersen parameters
    Generate(GenerateArgs),
    /// Split secret into Pedersen shares
    Split(SplitArgs),
    /// Verify Pedersen shares or parts
    Verify {
        #[command(subcommand)]
        command: VerifyCommand,
    },
    /// Combine Pedersen shares
    Combine(CombineArgs),
    /// Show the Pedersen version information
    Version,
}

#[derive(Subcommand)]
enum VerifyCommand {
    /// Verify Pedersen shares
    Shares(VerifySharesArgs),
    /// Verify Pedersen part
    Part(VerifyPartArgs),
}

#[derive(Args)]
struct FileFmtArgs {
    /// file format. allowed: yaml, json, xml
    #[arg(long)]
    format: Option<String>,

    /// output file permissions (octal)
    #[arg(long, default_value = "400")]
    perm: String,
}

impl FileFmtArgs {
    fn format(&self) -> Result<Option<FileFormat>> {
        self.format.as_deref().map(str::parse).transpose()
    }

    fn perm(&self) -> Result<u32> {
        u32::from_str_radix(&self.perm, 8)
            .map_err(|_| Error::InvalidOptions(format!("invalid octal file mode \"{}\"", self.perm)))
    }
}

#[derive(Args)]
struct PedersenArgs {
    /// shares parts
    #[arg(short, long, default_value_t = 5)]
    parts: usize,

    /// shares threshold
    #[arg(short, long, default_value_t = 3)]
    threshold: usize,

    /// group file
    #[arg(short, long)]
    group: PathBuf,
}

impl PedersenArgs {
    fn scheme(&self) -> Result<Pedersen> {
        let record: GroupRecord = io::read_file(&self.group, None)?;
        let group = Group::try_from(record)?;

        Pedersen::builder(self.parts, self.threshold)
            .cyclic_group(group)
            .build()
    }
}

#[derive(Args)]
struct SecretSharesArgs {
    /// secret shares files pattern expression.
    /// Use '*' as placeholder for the index of the share
    /// (e.g. shares/shareholder-*)
    #[arg(long)]
    shares: String,

    /// commitments file
    #[arg(long)]
    commitments: PathBuf,
}

impl SecretSharesArgs {
    fn share_path(&self, index: usize) -> PathBuf {
        PathBuf::from(self.shares.replace('*', &index.to_string()))
    }

    fn read_shares(&self, parts: usize) -> Result<pedersen::Shares> {
        let mut records = Vec::with_capacity(parts);

        for index in 0..parts {
            records.push(io::read_file::<ShareRecord>(&self.share_path(index), None)?);
        }

        let commitments: CommitmentsRecord = io::read_file(&self.commitments, None)?;

        schema::shares_from_records(records, commitments)
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    fmt: FileFmtArgs,

    /// prime bits size
    #[arg(short, long, default_value_t = 128)]
    bits: usize,

    /// output file
    #[arg(short, long)]
    out: PathBuf,
}

impl GenerateArgs {
    fn run(&self) -> Result<()> {
        let group = Group::generate(self.bits)?;

        io::write_file(
            &self.out,
            &GroupRecord::from(&group),
            self.fmt.format()?,
            self.fmt.perm()?,
        )
    }
}

#[derive(Args)]
struct SplitArgs {
    #[command(flatten)]
    pedersen: PedersenArgs,

    #[command(flatten)]
    shares: SecretSharesArgs,

    #[command(flatten)]
    fmt: FileFmtArgs,

    /// input file
    #[arg(short = 'i', long = "in")]
    input: PathBuf,
}

impl SplitArgs {
    fn run(&self) -> Result<()> {
        let scheme = self.pedersen.scheme()?;

        let secret = fs::read(&self.input)
            .map_err(|err| Error::Io {
                context: format!("reading {}", self.input.display()),
                source: err,
            })?;

        let shares = scheme.split(&secret, None)?;

        let format = self.fmt.format()?;
        let perm = self.fmt.perm()?;

        for index in 0..scheme.parts() {
            io::write_file(
                &self.shares.share_path(index),
                &ShareRecord::from_shares(&shares, index),
                format,
                perm,
            )?;
        }

        io::write_file(
            &self.shares.commitments,
            &CommitmentsRecord::from(&shares),
            format,
            perm,
        )
    }
}

#[derive(Args)]
struct VerifySharesArgs {
    #[command(flatten)]
    pedersen: PedersenArgs,

    #[command(flatten)]
    shares: SecretSharesArgs,
}

impl VerifySharesArgs {
    fn run(&self) -> Result<()> {
        let scheme = self.pedersen.scheme()?;
        let shares = self.shares.read_shares(scheme.parts())?;

        scheme.verify_shares(&shares)
    }
}

#[derive(Args)]
struct VerifyPartArgs {
    #[command(flatten)]
    pedersen: PedersenArgs,

    /// secret shares file
    #[arg(long)]
    share: PathBuf,

    /// commitments file
    #[arg(long)]
    commitments: PathBuf,
}

impl VerifyPartArgs {
    fn run(&self) -> Result<()> {
        let scheme = self.pedersen.scheme()?;

        let record: ShareRecord = io::read_file(&self.share, None)?;
        let commitments: CommitmentsRecord = io::read_file(&self.commitments, None)?;

        let shares = schema::shares_from_records(vec![record], commitments)?;
        let abscissa = &shares.abscissae[0];

        for (index, part) in shares.parts[0].iter().enumerate() {
            let part = part.as_ref().ok_or(Error::NilShare)?;
            let commitments = shares
                .commitments
                .get(index)
                .ok_or(Error::InsufficientCommitments)?;

            scheme.verify(abscissa, part, commitments)?;
        }

        Ok(())
    }
}

#[derive(Args)]
struct CombineArgs {
    #[command(flatten)]
    pedersen: PedersenArgs,

    #[command(flatten)]
    shares: SecretSharesArgs,

    #[command(flatten)]
    fmt: FileFmtArgs,

    /// output file
    #[arg(short, long)]
    out: PathBuf,

    /// verify shares before combine
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    verify: bool,
}

impl CombineArgs {
    fn run(&self) -> Result<()> {
        let scheme = self.pedersen.scheme()?;
        let shares = self.shares.read_shares(scheme.parts())?;

        if self.verify {
            scheme.verify_shares(&shares)?;
        }

        let secret = scheme.combine(&shares)?;

        fs::write(&self.out, &secret).map_err(|err| Error::Io {
            context: format!("writing {}", self.out.display()),
            source: err,
        })?;

        set_mode(&self.out, self.fmt.perm()?)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|err| Error::Io {
        context: format!("chmod {}", path.display()),
        source: err,
    })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

fn init_logging(loglevel: &str, logfile: Option<&str>) -> Result<()> {
    // no log destination, logging stays disabled
    let Some(output) = logfile else {
        return Ok(());
    };

    let filter = EnvFilter::try_new(loglevel)
        .map_err(|err| Error::InvalidOptions(format!("invalid log level: {err}")))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if output.eq_ignore_ascii_case("stdout") {
        builder.init();
    } else {
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(output)
            .map_err(|err| Error::Io {
                context: format!("opening log file {output}"),
                source: err,
            })?;

        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.loglevel, cli.logfile.as_deref())?;

    match cli.command {
        Command::Generate(args) => args.run(),
        Command::Split(args) => args.run(),
        Command::Verify { command } => match command {
            VerifyCommand::Shares(args) => args.run(),
            VerifyCommand::Part(args) => args.run(),
        },
        Command::Combine(args) => args.run(),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();

            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    if let Err(err) = run(cli) {
        error!("{err}");
        eprintln!("{err}");
        process::exit(1);
    }
}
