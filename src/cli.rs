use crate::github::{API_BASE_URL, DEFAULT_USER_AGENT};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gitfolio")]
#[command(about = "Gitfolio - Serves developer portfolios built from public GitHub profiles")]
#[command(version)]
pub struct Cli {
    /// Address the portfolio server listens on
    #[arg(long, env = "GITFOLIO_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = API_BASE_URL)]
    pub api_url: String,

    /// Timeout for each GitHub request, in seconds
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent sent to GitHub
    #[arg(long, env = "GITFOLIO_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["gitfolio"]).unwrap();
        assert_eq!(cli.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.api_url, "https://api.github.com");
        assert_eq!(cli.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn overrides() {
        let cli = Cli::try_parse_from([
            "gitfolio",
            "--bind",
            "0.0.0.0:3000",
            "--api-url",
            "http://localhost:9999",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.bind.port(), 3000);
        assert_eq!(cli.api_url, "http://localhost:9999");
        assert_eq!(cli.timeout_secs, 5);
    }
}
