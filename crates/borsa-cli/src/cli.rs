use borsa_gateway::{BatchKind, Period};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "borsa")]
#[command(about = "Borsa Istanbul quotes, favorites and watchlist", long_about = None)]
pub struct Cli {
    /// Gateway base URL (defaults to BORSA_GATEWAY_URL)
    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    /// Directory for persisted favorites and watchlist (defaults to BORSA_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the gateway HTTP server
    Serve {
        /// Bind host (overrides BORSA_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides BORSA_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Latest quote for a symbol
    Quote { symbol: String },
    /// Company details and yearly statistics
    Details { symbol: String },
    /// Daily price history
    History {
        symbol: String,
        /// 5d, 1mo, 3mo, 6mo or 1y
        #[arg(short, long, default_value = "1mo", value_parser = parse_period)]
        period: Period,
    },
    /// Search companies by ticker or name
    Search { query: String },
    /// Predefined listings
    List {
        #[arg(short, long, value_enum, default_value_t = ListKind::Popular)]
        kind: ListKind,
    },
    /// Logo URLs for a symbol
    Logo {
        symbol: String,
        #[arg(short, long, default_value_t = borsa_gateway::logo::DEFAULT_LOGO_SIZE)]
        size: u32,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        action: WatchlistAction,
    },
    /// Compare two symbols side by side
    Compare {
        first: String,
        second: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// Show favorites with live quotes
    List,
    /// Add a symbol, or remove it if already a favorite
    Toggle { symbol: String },
}

#[derive(Subcommand, Debug)]
pub enum WatchlistAction {
    /// Show the watchlist with live quotes
    List,
    /// Add a symbol to the watchlist
    Add { symbol: String },
    /// Remove a symbol from the watchlist
    Remove { symbol: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Popular,
    Gainers,
    Losers,
}

impl From<ListKind> for BatchKind {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Popular => Self::Popular,
            ListKind::Gainers => Self::Gainers,
            ListKind::Losers => Self::Losers,
        }
    }
}

fn parse_period(value: &str) -> Result<Period, String> {
    value
        .parse()
        .map_err(|e: borsa_gateway::GatewayError| e.to_string())
}
