use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HTTP_PATH: &str = "/mcp";
const DEFAULT_SEARCH_LIMIT: usize = 50;

/// How the MCP server talks to its client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    /// Raw JSON-RPC over accepted TCP connections.
    Tcp(SocketAddr),
    /// Streamable HTTP mounted at `path`.
    Http { addr: SocketAddr, path: String },
}

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    /// Default and maximum number of results returned by `search_terms`.
    pub search_limit: usize,
}

impl Config {
    /// Optional:
    /// - `MCP_TCP_LISTEN_ADDR`: serve JSON-RPC over TCP on this address
    /// - `MCP_HTTP_LISTEN_ADDR`: serve streamable HTTP on this address
    /// - `MCP_HTTP_PATH`: HTTP mount point (default: "/mcp")
    /// - `GLOSSARY_SEARCH_LIMIT`: search result cap (default: 50)
    ///
    /// With neither listen address set the server uses stdio.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let tcp = get("MCP_TCP_LISTEN_ADDR").filter(|s| !s.trim().is_empty());
        let http = get("MCP_HTTP_LISTEN_ADDR").filter(|s| !s.trim().is_empty());

        let transport = match (tcp, http) {
            (Some(_), Some(_)) => {
                return Err(AppError::Config(
                    "MCP_TCP_LISTEN_ADDR and MCP_HTTP_LISTEN_ADDR are mutually exclusive"
                        .to_string(),
                ))
            }
            (Some(addr), None) => Transport::Tcp(parse_addr("MCP_TCP_LISTEN_ADDR", &addr)?),
            (None, Some(addr)) => {
                let path = get("MCP_HTTP_PATH").unwrap_or_else(|| DEFAULT_HTTP_PATH.to_string());
                if !path.starts_with('/') {
                    return Err(AppError::Config(format!(
                        "MCP_HTTP_PATH must start with '/': {path}"
                    )));
                }
                Transport::Http {
                    addr: parse_addr("MCP_HTTP_LISTEN_ADDR", &addr)?,
                    path,
                }
            }
            (None, None) => Transport::Stdio,
        };

        let search_limit = match get("GLOSSARY_SEARCH_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "GLOSSARY_SEARCH_LIMIT must be a positive integer: {raw}"
                    ))
                })?,
            None => DEFAULT_SEARCH_LIMIT,
        };

        Ok(Self {
            transport,
            search_limit,
        })
    }
}

fn parse_addr(var: &str, raw: &str) -> Result<SocketAddr, AppError> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{var} is not a socket address ({raw}): {e}")))
}
