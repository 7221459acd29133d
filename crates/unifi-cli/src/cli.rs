//! Clap derive structures for the `unifi` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! crate-internal imports so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unifi -- command-line client for UniFi network controllers
#[derive(Debug, Parser)]
#[command(
    name = "unifi",
    version,
    about = "Query and manage a UniFi network controller",
    long_about = "Query and manage a UniFi network controller through its management\n\
        API, using a cookie session.\n\n\
        Works against UniFi OS gateways (UDM, UCG, Cloud Key Gen2+) and\n\
        standalone Network Application installs alike.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "UNIFI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL, https only (overrides profile)
    #[arg(long, short = 'c', env = "UNIFI_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Site slug
    #[arg(long, short = 's', env = "UNIFI_SITE", global = true)]
    pub site: Option<String>,

    /// Controller username (overrides profile)
    #[arg(long, short = 'u', env = "UNIFI_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "UNIFI_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "UNIFI_INSECURE", global = true)]
    pub insecure: bool,

    /// Verify the controller against this CA certificate (PEM)
    #[arg(long, env = "UNIFI_CA_CERT", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, env = "UNIFI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List sites visible to the account
    Sites,

    /// List adopted devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List connected clients
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// Show subsystem health for the site
    Health,

    /// List alarms
    Alarms(AlarmsArgs),

    /// List or create hotspot vouchers
    #[command(alias = "v")]
    Vouchers(VouchersArgs),

    /// Authorize or unauthorize hotspot guests
    Guests(GuestsArgs),

    /// Send a raw request and print the response envelope
    Request(RequestArgs),

    /// Inspect the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Listing args ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Only the device with this MAC address
    #[arg(long)]
    pub mac: Option<String>,
}

#[derive(Debug, Args)]
pub struct ClientsArgs {
    /// Only the client with this MAC address
    #[arg(long)]
    pub mac: Option<String>,
}

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    /// Filter on the archived flag (omit for all alarms)
    #[arg(long)]
    pub archived: Option<bool>,
}

// ── Vouchers ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VouchersArgs {
    #[command(subcommand)]
    pub command: VouchersCommand,
}

#[derive(Debug, Subcommand)]
pub enum VouchersCommand {
    /// List vouchers
    #[command(alias = "ls")]
    List,

    /// Create a batch of vouchers
    Create {
        /// Validity in minutes once redeemed
        #[arg(long, short = 'm')]
        minutes: u32,

        /// Number of vouchers to create
        #[arg(long, short = 'n', default_value = "1")]
        count: u32,

        /// Redemptions allowed per voucher (0 = unlimited)
        #[arg(long, default_value = "1")]
        quota: u32,

        /// Note attached to every voucher in the batch
        #[arg(long)]
        note: Option<String>,

        /// Upload limit in Kbps
        #[arg(long)]
        up: Option<u32>,

        /// Download limit in Kbps
        #[arg(long)]
        down: Option<u32>,

        /// Data quota in MB
        #[arg(long)]
        megabytes: Option<u32>,
    },
}

// ── Guests ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GuestsArgs {
    #[command(subcommand)]
    pub command: GuestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GuestsCommand {
    /// Grant a guest portal access
    Authorize {
        /// Guest MAC address
        mac: String,

        /// Minutes of access
        #[arg(long, short = 'm', default_value = "60")]
        minutes: u32,

        /// Upload limit in Kbps
        #[arg(long)]
        up: Option<u32>,

        /// Download limit in Kbps
        #[arg(long)]
        down: Option<u32>,

        /// Data quota in MB
        #[arg(long)]
        megabytes: Option<u32>,

        /// AP the guest is connected to
        #[arg(long)]
        ap_mac: Option<String>,
    },

    /// Revoke a guest's access
    Unauthorize {
        /// Guest MAC address
        mac: String,
    },
}

// ── Raw request ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE, PATCH; anything else is GET)
    pub method: String,

    /// Logical API path, e.g. /api/s/default/stat/health
    pub path: String,

    /// JSON request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (passwords redacted)
    Show,

    /// Print the configuration file location
    Path,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
