use crate::analyzer::swarmlint::{ALL_SERVICES, OutputFormat};
use crate::config::types::Config;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swarm-conformity")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Audit Docker Swarm services against operational best practices")]
#[command(long_about = "Inspects running Docker Swarm services and reports whether each one \
declares resource limits, uses a sane restart policy, and carries load balancer labels \
consistent with the swarm's networks. Exits 0 when no check fails, 1 when at least one \
check fails, and 2 on any fatal error. Warnings never affect the exit status.")]
pub struct Cli {
    /// The name of the service to check. If omitted or `all`, every service is checked.
    #[arg(value_name = "SERVICE", default_value = ALL_SERVICES)]
    pub service: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Docker daemon address (tcp://host:port, https://, http:// or unix://path)
    #[arg(short = 'H', long, env = "DOCKER_HOST", value_name = "URL")]
    pub host: Option<String>,

    /// Directory containing ca.pem, cert.pem and key.pem for TLS
    #[arg(long, env = "DOCKER_CERT_PATH", value_name = "DIR")]
    pub cert_path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging (-v shows passing checks, -vv adds trace diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except failing checks and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level.
    ///
    /// Report lines are written to stdout without any prefix; the level only
    /// decides which lines are shown.
    pub fn init_logging(&self) {
        let level = if self.quiet {
            log::LevelFilter::Error
        } else {
            match self.verbose {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .filter_module("swarm_conformity", level)
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .target(env_logger::Target::Stdout)
            .try_init();
    }

    /// Layer command-line and environment overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.connection.host = Some(host.clone());
        }
        if let Some(cert_path) = &self.cert_path {
            config.connection.cert_path = Some(cert_path.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.no_color {
            config.output.color = false;
        }
    }
}
