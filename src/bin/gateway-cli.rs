use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the search gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the gateway is up
    Ping,
    /// Show gateway health
    Health,
    /// Email enrichment lookup
    SeonEmail { email: String },
    /// Phone enrichment lookup
    SeonPhone { phone: String },
    /// Leak check for a term
    Leakcheck { term: String },
    /// Breach database search
    Breach {
        #[arg(value_enum)]
        source: BreachSource,
        search_type: String,
        query: String,
    },
    /// OathNet lookups
    Oathnet {
        #[command(subcommand)]
        lookup: OathnetLookup,
    },
    /// Generic search against any upstream endpoint
    Search {
        endpoint: String,
        #[arg(long)]
        search_type: Option<String>,
        #[arg(long)]
        query: Option<String>,
        /// Issue a GET instead of a POST
        #[arg(long)]
        get: bool,
        /// Query parameters for GET, as key=value
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Explicit JSON body for POST
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BreachSource {
    Snusbase,
    Intelvault,
    Breachbase,
    Hackcheck,
}

impl BreachSource {
    fn route(&self) -> &'static str {
        match self {
            BreachSource::Snusbase => "snusbase",
            BreachSource::Intelvault => "intelvault",
            BreachSource::Breachbase => "breachbase",
            BreachSource::Hackcheck => "hackcheck",
        }
    }
}

#[derive(Subcommand)]
enum OathnetLookup {
    Ip { ip: String },
    Roblox { username: String },
    DiscordRoblox { discordid: String },
    Holhe { email: String },
    Ghunt { email: String },
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let get = |route: &str, params: Vec<(&str, String)>| {
        client.get(format!("{}/{}", base, route)).query(&params)
    };
    let post = |route: &str, body: Value| client.post(format!("{}/{}", base, route)).json(&body);

    let request = match cli.command {
        Commands::Ping => get("ping", Vec::new()),
        Commands::Health => get("health", Vec::new()),
        Commands::SeonEmail { email } => get("seon_email", vec![("email", email)]),
        Commands::SeonPhone { phone } => get("seon_phone", vec![("phone", phone)]),
        Commands::Leakcheck { term } => get("leakcheck", vec![("term", term)]),
        Commands::Breach {
            source,
            search_type,
            query,
        } => post(
            source.route(),
            json!({ "search_type": search_type, "query": query }),
        ),
        Commands::Oathnet { lookup } => match lookup {
            OathnetLookup::Ip { ip } => get("oathnet_ip", vec![("ip", ip)]),
            OathnetLookup::Roblox { username } => {
                get("oathnet_roblox", vec![("username", username)])
            }
            OathnetLookup::DiscordRoblox { discordid } => {
                get("oathnet_discord_roblox", vec![("discordid", discordid)])
            }
            OathnetLookup::Holhe { email } => get("oathnet_holhe", vec![("email", email)]),
            OathnetLookup::Ghunt { email } => post("oathnet_ghunt", json!({ "email": email })),
        },
        Commands::Search {
            endpoint,
            search_type,
            query,
            get: is_get,
            params,
            body,
        } => {
            let post_body = body.map(|b| serde_json::from_str::<Value>(&b)).transpose()?;
            let params: serde_json::Map<String, Value> = params
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            post(
                "search",
                json!({
                    "endpoint": endpoint,
                    "search_type": search_type,
                    "query": query,
                    "is_get": is_get,
                    "params": if params.is_empty() { Value::Null } else { Value::Object(params) },
                    "post_body": post_body,
                }),
            )
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
