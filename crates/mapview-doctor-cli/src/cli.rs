use clap::Parser;
use mapview_doctor::config::DiagnosticConfig;
use std::path::PathBuf;

/// Check that a web map client can render: WebGL, textures and backend
#[derive(Debug, Parser)]
#[command(name = "mapview-doctor", version, about)]
pub struct Cli {
    /// YAML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Texture to probe (path or URL)
    #[arg(long, value_name = "LOCATION")]
    pub texture_path: Option<String>,

    /// Backend status endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Origin relative locations are resolved against
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Per-probe timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Annotate failed findings with a remediation strategy
    #[arg(long)]
    pub remediate: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Show causes, fixes and remediation actions
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Settings given as flags
    pub fn flag_config(&self) -> DiagnosticConfig {
        DiagnosticConfig {
            texture_path: self.texture_path.clone(),
            api_url: self.api_url.clone(),
            base_url: self.base_url.clone(),
            request_timeout_ms: self.timeout_ms,
        }
    }
}
