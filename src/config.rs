use clap::Parser;

/// WNBA win-probability dashboard backed by Massey Ratings
#[derive(Parser, Debug, Clone)]
#[command(name = "massey-winprob", version, about)]
pub struct Config {
    /// Ratings page to scrape
    #[arg(
        long,
        env = "RATINGS_URL",
        default_value = "https://masseyratings.com/wnba/ratings"
    )]
    pub ratings_url: String,

    /// User-Agent sent with the ratings request (the site rejects
    /// default library identification)
    #[arg(
        long,
        env = "RATINGS_USER_AGENT",
        default_value = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
    )]
    pub user_agent: String,

    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Timeout for the ratings fetch in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,

    /// Standard deviation used to scale the rating gap before applying
    /// the normal CDF
    #[arg(long, env = "SIGMA", default_value_t = crate::winprob::DEFAULT_SIGMA)]
    pub sigma: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            anyhow::bail!("sigma must be a positive finite number");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be at least 1");
        }
        if self.ratings_url.is_empty() {
            anyhow::bail!("ratings_url must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> Config {
        Config::parse_from(["massey-winprob"])
    }

    #[test]
    fn defaults_validate() {
        assert!(default_config().validate().is_ok());
    }

    #[test]
    fn default_url_is_massey_wnba() {
        assert_eq!(
            default_config().ratings_url,
            "https://masseyratings.com/wnba/ratings"
        );
    }

    #[test]
    fn zero_sigma_rejected() {
        let mut config = default_config();
        config.sigma = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_sigma_rejected() {
        let mut config = default_config();
        config.sigma = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = default_config();
        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
