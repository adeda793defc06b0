//! Company logo URL resolution

use crate::model::LogoUrls;
use crate::universe;
use url::form_urlencoded;

/// Default logo edge length in pixels
pub const DEFAULT_LOGO_SIZE: u32 = 64;

const AVATAR_BASE: &str = "https://ui-avatars.com/api/";

const AVATAR_COLORS: [&str; 6] = [
    "3B82F6", "8B5CF6", "EC4899", "F59E0B", "10B981", "EF4444",
];

/// Builds logo URLs for tickers
///
/// Known companies resolve through their web domain; anything else goes to
/// logo.dev keyed by the lower-case ticker. The fallback is a text avatar that
/// always renders.
#[derive(Debug, Clone, Default)]
pub struct LogoResolver {
    token: Option<String>,
}

impl LogoResolver {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Primary logo URL for `symbol`
    pub fn logo(&self, symbol: &str, size: u32) -> String {
        let symbol = symbol.trim();
        if let Some(domain) = universe::find(symbol).and_then(|c| c.domain) {
            return format!("https://logo.clearbit.com/{domain}?size={size}");
        }

        let slug = escape(&symbol.to_lowercase());
        match &self.token {
            Some(token) => format!("https://img.logo.dev/{slug}.is?token={token}&size={size}"),
            None => format!("https://img.logo.dev/{slug}.is?size={size}"),
        }
    }

    /// Text avatar URL for `symbol`
    pub fn fallback(&self, symbol: &str) -> String {
        let symbol = symbol.trim().to_uppercase();
        let first = symbol.bytes().next().map_or(0, usize::from);
        let color = AVATAR_COLORS[first % AVATAR_COLORS.len()];
        let name = escape(&symbol);
        format!("{AVATAR_BASE}?name={name}&background={color}&color=fff&size=128&bold=true")
    }

    /// Both URLs at once
    pub fn resolve(&self, symbol: &str, size: u32) -> LogoUrls {
        LogoUrls {
            primary: self.logo(symbol, size),
            fallback: self.fallback(symbol),
        }
    }
}

/// Percent-encode `value` for use in a URL path or query
fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
