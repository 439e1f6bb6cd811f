use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::models::FormState;

#[derive(Parser)]
#[command(name = "script-forge")]
#[command(version)]
#[command(about = "Generate vendor-specific network device configuration scripts")]
pub struct Cli {
    /// Generator server base URL (overrides GENERATOR_URL)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Credentials file (overrides CREDENTIALS_PATH)
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fill in the form and generate a configuration script
    Generate(GenerateArgs),
    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// List supported vendors and their defaults
    Vendors,
    /// Serve the browser front end and forward generation requests upstream
    Serve {
        /// Listen address (overrides LISTEN_ADDR)
        #[arg(short, long)]
        listen: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Store a key
    Save { key: String },
    /// Show the stored key, masked
    Show,
    /// Remove the stored key
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Vendor identifier (cisco, arista, alcatel, hp, juniper, fortinet)
    #[arg(short, long)]
    pub vendor: String,

    #[arg(long)]
    pub hostname: Option<String>,

    /// Free-text requirements; makes --ip/--mask optional
    #[arg(short, long)]
    pub requirements: Option<String>,

    /// Management IP address
    #[arg(long = "ip", alias = "mgmt-ip")]
    pub mgmt_ip: Option<String>,

    /// Subnet mask (255.255.255.0 or /24)
    #[arg(long = "mask", alias = "mgmt-mask")]
    pub mgmt_mask: Option<String>,

    #[arg(long = "vlan", alias = "mgmt-vlan")]
    pub mgmt_vlan: Option<String>,

    #[arg(long = "interface", alias = "mgmt-interface")]
    pub mgmt_interface: Option<String>,

    /// Management port (Fortinet)
    #[arg(long = "port", alias = "mgmt-port")]
    pub mgmt_port: Option<String>,

    #[arg(long)]
    pub gateway: Option<String>,

    /// API key; saved for later runs when well-formed
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Copy the generated script to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Download the generated script into the download directory
    #[arg(long)]
    pub download: bool,

    /// Download directory (overrides DOWNLOAD_DIR)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(server) = &self.server {
            cfg.generator_url = server.clone();
        }
        if let Some(path) = &self.credentials {
            cfg.credentials_path = path.clone();
        }
        match &self.command {
            Command::Generate(args) => {
                if let Some(dir) = &args.out_dir {
                    cfg.download_dir = dir.clone();
                }
            }
            Command::Serve {
                listen: Some(listen),
            } => cfg.listen_addr = listen.clone(),
            _ => {}
        }
    }
}

impl GenerateArgs {
    /// Overwrite the vendor defaults with whatever was passed explicitly
    pub fn apply_to(&self, form: &mut FormState) {
        let overrides = [
            (&mut form.hostname, &self.hostname),
            (&mut form.requirements, &self.requirements),
            (&mut form.mgmt_ip, &self.mgmt_ip),
            (&mut form.mgmt_mask, &self.mgmt_mask),
            (&mut form.mgmt_vlan, &self.mgmt_vlan),
            (&mut form.mgmt_interface, &self.mgmt_interface),
            (&mut form.mgmt_port, &self.mgmt_port),
            (&mut form.gateway, &self.gateway),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
    }
}
