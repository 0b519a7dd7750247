pub mod add;
pub mod check;
pub mod list;
pub mod menu;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use pulsr_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_LOG_FILE, DEFAULT_REGISTRY_FILE, HostStrategy,
    ServiceBackend,
};

#[derive(Parser)]
#[command(name = "pulsr")]
#[command(about = "A lightweight health monitor for websites, hosts and services.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Target list file
    #[arg(long, global = true, default_value = DEFAULT_REGISTRY_FILE)]
    pub registry: PathBuf,

    /// Check log written by `watch`
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Seconds between two background cycles
    #[arg(long, global = true, default_value_t = 60)]
    pub interval: u64,

    /// Seconds before a website request is abandoned
    #[arg(long, global = true, default_value_t = 10)]
    pub website_timeout: u64,

    /// Milliseconds to wait for a host to answer
    #[arg(long, global = true, default_value_t = 2000)]
    pub host_timeout: u64,

    /// Seconds a single check may take in total
    #[arg(long, global = true, default_value_t = 30)]
    pub deadline: u64,

    /// Checks in flight at once
    #[arg(long, global = true, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// How hosts are checked: icmp, tcp or auto
    #[arg(long, global = true, default_value = "icmp")]
    pub host_probe: HostStrategy,

    /// Who answers service checks: auto, systemd or process
    #[arg(long, global = true, default_value = "auto")]
    pub service_backend: ServiceBackend,

    /// Program run for every alert, receiving the title and message as arguments
    #[arg(long, global = true)]
    pub alert_command: Option<String>,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Less output (repeat for even less)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// More diagnostics (repeat for even more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a website to the list
    #[command(alias = "w")]
    AddWebsite { url: String },
    /// Add a host to the list
    #[command(alias = "h")]
    AddHost { address: String },
    /// Add a service running on a host to the list
    #[command(alias = "s")]
    AddService { host: String, service: String },
    /// Show every registered target
    #[command(alias = "l")]
    List,
    /// Check every target once and print a report
    #[command(alias = "c")]
    Check,
    /// Check on a fixed interval, logging and alerting, until Ctrl-C
    Watch,
    /// Numbered interactive menu
    #[command(alias = "m")]
    Menu,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            registry_path: self.registry.clone(),
            log_path: self.log_file.clone(),
            interval: Duration::from_secs(self.interval),
            website_timeout: Duration::from_secs(self.website_timeout),
            host_timeout: Duration::from_millis(self.host_timeout),
            check_deadline: Duration::from_secs(self.deadline),
            concurrency: self.concurrency,
            host_strategy: self.host_probe,
            service_backend: self.service_backend,
            alert_command: self.alert_command.clone(),
            no_banner: self.no_banner,
            quiet: self.quiet,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
