use clap::{Parser, builder::BoolishValueParser};
use diy_mcp::server::McpHttpServerConfig;
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_CODES_PATH: &str = "data/codes.json";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(
    name = "diy-mcpd",
    version,
    about = "Building-codes and material-specs MCP daemon."
)]
struct CliArgs {
    #[arg(long, env = "DIY_CODES_PATH", default_value = DEFAULT_CODES_PATH)]
    codes_path: PathBuf,

    /// Serve a single server over stdio instead of HTTP: `codes` or `materials`.
    #[arg(long, env = "DIY_STDIO")]
    stdio: Option<String>,

    #[arg(
        long,
        env = "DIY_CODES_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    codes_serve: bool,

    #[arg(
        long,
        env = "DIY_MATERIALS_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    materials_serve: bool,

    #[arg(long, env = "DIY_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "DIY_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// Zero disables SSE keep-alive pings.
    #[arg(
        long,
        env = "DIY_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    #[arg(long, env = "DIY_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,
}

/// Which server to attach to stdio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioServer {
    Codes,
    Materials,
}

impl StdioServer {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "codes" | "building-codes" => Some(Self::Codes),
            "materials" | "material-specs" => Some(Self::Materials),
            _ => None,
        }
    }
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct DiyConfig {
    pub codes_path: PathBuf,
    pub stdio: Option<StdioServer>,
    pub codes_serve: bool,
    pub materials_serve: bool,
    pub http: McpHttpServerConfig,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl DiyConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for DiyConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.codes_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingSetting("DIY_CODES_PATH"));
        }

        let stdio = match args.stdio.filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(StdioServer::parse(&value).ok_or(ConfigError::InvalidSetting {
                name: "DIY_STDIO",
                value,
            })?),
            None => None,
        };

        if stdio.is_none() && !args.codes_serve && !args.materials_serve {
            return Err(ConfigError::MissingSetting(
                "DIY_CODES_SERVE or DIY_MATERIALS_SERVE",
            ));
        }

        if EnvFilter::try_new(&args.log).is_err() {
            return Err(ConfigError::InvalidSetting {
                name: "DIY_LOG",
                value: args.log,
            });
        }

        let sse_keep_alive = if args.sse_keep_alive_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.sse_keep_alive_secs))
        };
        let http = McpHttpServerConfig::new(args.mcp_http_addr)
            .with_stateful_mode(args.mcp_stateful)
            .with_sse_keep_alive(sse_keep_alive);

        Ok(Self {
            codes_path: args.codes_path,
            stdio,
            codes_serve: args.codes_serve,
            materials_serve: args.materials_serve,
            http,
            log_filter: args.log,
        })
    }
}
