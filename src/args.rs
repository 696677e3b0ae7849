//! Command-line argument definition.

use clap::Parser;

/// Swapsea - a terminal client for the item-swap marketplace
#[derive(Parser, Debug, Clone)]
#[command(name = "swapsea")]
#[command(version)]
#[command(about = "A terminal client for browsing, proposing, and managing item swaps", long_about = None)]
pub struct Args {
    /// Log remote mutations instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// API base URL (overrides settings.toml)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Listings per page in the Browse view (overrides settings.toml)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Flags parse with and without overrides
    ///
    /// - Input: Bare invocation, then every flag set
    /// - Output: Defaults first, overrides second
    fn args_parse() {
        let a = Args::parse_from(["swapsea"]);
        assert!(!a.dry_run);
        assert_eq!(a.log_level, "info");
        assert!(a.api_url.is_none());

        let a = Args::parse_from([
            "swapsea",
            "--dry-run",
            "--log-level",
            "debug",
            "--api-url",
            "https://swap.example/api",
            "--page-size",
            "10",
        ]);
        assert!(a.dry_run);
        assert_eq!(a.log_level, "debug");
        assert_eq!(a.api_url.as_deref(), Some("https://swap.example/api"));
        assert_eq!(a.page_size, Some(10));
    }
}
