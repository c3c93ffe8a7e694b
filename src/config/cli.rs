use crate::config::toml_config::TomlConfig;
use crate::config::ApiSettings;
use crate::utils::error::{PortError, Result};
use crate::utils::validation::Validate;
use clap::Args;

/// Flags shared by both binaries.
#[derive(Clone, Default, Args)]
pub struct CliConfig {
    /// Value sent in the Authorization header
    #[arg(long, env = "PORT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Port API [default: https://api.getport.io/v1]
    #[arg(long, env = "PORT_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Optional TOML file with [api] and [scorecard] sections
    #[arg(short, long)]
    pub config: Option<String>,

    /// Validate and print the documents without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        match &self.config {
            Some(path) => {
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    pub fn settings(&self, file: Option<&TomlConfig>) -> ApiSettings {
        ApiSettings::resolve(
            self.api_key.clone(),
            self.base_url.clone(),
            self.timeout_seconds,
            file,
        )
    }

    pub fn init_logging(&self) {
        if self.log_json {
            crate::utils::logger::init_json_logger();
        } else {
            crate::utils::logger::init_cli_logger(self.verbose);
        }
    }
}

/// Reports the error and exits with the code its severity maps to.
pub fn exit_with(action: &str, e: &PortError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        action,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code())
}
