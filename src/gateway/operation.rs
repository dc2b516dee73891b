//! Logical operations and their static upstream endpoints.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// HTTP verb used against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// A fixed upstream path plus the verb it is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamEndpoint {
    pub path: &'static str,
    pub method: HttpMethod,
}

impl UpstreamEndpoint {
    const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Get,
        }
    }

    const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: HttpMethod::Post,
        }
    }
}

/// Every inbound request kind the gateway supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Generic pass-through; the caller picks endpoint and method.
    Search,
    SeonEmail,
    SeonPhone,
    Snusbase,
    Intelvault,
    Breachbase,
    Hackcheck,
    Leakcheck,
    OathnetIp,
    OathnetRoblox,
    OathnetDiscordRoblox,
    OathnetHolhe,
    OathnetGhunt,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::Search,
        Operation::SeonEmail,
        Operation::SeonPhone,
        Operation::Snusbase,
        Operation::Intelvault,
        Operation::Breachbase,
        Operation::Hackcheck,
        Operation::Leakcheck,
        Operation::OathnetIp,
        Operation::OathnetRoblox,
        Operation::OathnetDiscordRoblox,
        Operation::OathnetHolhe,
        Operation::OathnetGhunt,
    ];

    /// Stable name, identical to the inbound route without its slash.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Search => "search",
            Operation::SeonEmail => "seon_email",
            Operation::SeonPhone => "seon_phone",
            Operation::Snusbase => "snusbase",
            Operation::Intelvault => "intelvault",
            Operation::Breachbase => "breachbase",
            Operation::Hackcheck => "hackcheck",
            Operation::Leakcheck => "leakcheck",
            Operation::OathnetIp => "oathnet_ip",
            Operation::OathnetRoblox => "oathnet_roblox",
            Operation::OathnetDiscordRoblox => "oathnet_discord_roblox",
            Operation::OathnetHolhe => "oathnet_holhe",
            Operation::OathnetGhunt => "oathnet_ghunt",
        }
    }

    /// Upstream endpoint bound to this operation. `None` for `Search`.
    pub fn endpoint(&self) -> Option<UpstreamEndpoint> {
        let endpoint = match self {
            Operation::Search => return None,
            Operation::SeonEmail => UpstreamEndpoint::get("/api/seon/email"),
            Operation::SeonPhone => UpstreamEndpoint::get("/api/seon/phone"),
            Operation::Leakcheck => UpstreamEndpoint::get("/api/leakcheck"),
            Operation::OathnetIp => UpstreamEndpoint::get("/api/oathnet/ip-info"),
            Operation::OathnetRoblox => UpstreamEndpoint::get("/api/oathnet/roblox-userinfo"),
            Operation::OathnetDiscordRoblox => {
                UpstreamEndpoint::get("/api/oathnet/discord-to-roblox")
            }
            Operation::OathnetHolhe => UpstreamEndpoint::get("/api/oathnet/holhe"),
            Operation::Snusbase => UpstreamEndpoint::post("/api/snusbase"),
            Operation::Intelvault => UpstreamEndpoint::post("/api/intelvault"),
            Operation::Breachbase => UpstreamEndpoint::post("/api/breachbase"),
            Operation::Hackcheck => UpstreamEndpoint::post("/api/hackcheck"),
            Operation::OathnetGhunt => UpstreamEndpoint::post("/api/oathnet/ghunt"),
        };
        Some(endpoint)
    }

    /// Name of the single query parameter a GET-style operation binds.
    pub fn query_param(&self) -> Option<&'static str> {
        match self {
            Operation::SeonEmail | Operation::OathnetHolhe => Some("email"),
            Operation::SeonPhone => Some("phone"),
            Operation::Leakcheck => Some("term"),
            Operation::OathnetIp => Some("ip"),
            Operation::OathnetRoblox => Some("username"),
            Operation::OathnetDiscordRoblox => Some("discordid"),
            _ => None,
        }
    }

    /// Breach-search style operations taking `query` + `search_type`.
    pub fn is_term_search(&self) -> bool {
        matches!(
            self,
            Operation::Snusbase | Operation::Intelvault | Operation::Breachbase | Operation::Hackcheck
        )
    }

    /// Enrichment lookups whose responses are flattened.
    pub fn flattens_response(&self) -> bool {
        matches!(self, Operation::SeonEmail | Operation::SeonPhone)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

/// One inbound request, reduced to what the payload builder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalRequest {
    pub operation: Operation,
    pub search_type: Option<String>,
    /// Search term, or the single named parameter of GET-style operations.
    pub query: Option<String>,
    /// Caller-chosen upstream path (generic search only).
    pub endpoint: Option<String>,
    pub is_direct_get: bool,
    pub raw_params: Option<Map<String, Value>>,
    pub raw_body: Option<Value>,
}

impl LogicalRequest {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            search_type: None,
            query: None,
            endpoint: None,
            is_direct_get: false,
            raw_params: None,
            raw_body: None,
        }
    }

    /// A GET-style lookup carrying its single parameter value.
    pub fn lookup(operation: Operation, value: Option<String>) -> Self {
        Self {
            query: value,
            ..Self::new(operation)
        }
    }

    /// A term search (`query` + `search_type`).
    pub fn term_search(
        operation: Operation,
        query: Option<String>,
        search_type: Option<String>,
    ) -> Self {
        Self {
            query,
            search_type,
            ..Self::new(operation)
        }
    }
}
