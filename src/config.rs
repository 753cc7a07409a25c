use std::str::FromStr;

/// Decision thresholds, in percent (or knots for `high_speed_knots`).
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Lower bound of the RISKY zone; anything below is DO NOT SAIL.
    pub profit_risky_pct: f64,
    /// Lower bound of the GO WITH CAUTION zone.
    pub profit_caution_pct: f64,
    /// Lower bound of the STRONG GO zone.
    pub profit_strong_pct: f64,
    pub fuel_heavy_pct: f64,
    pub fuel_dominant_pct: f64,
    pub port_heavy_pct: f64,
    pub high_speed_knots: f64,
    /// Pre-pipeline advisory: speed above this gets a fuel burn warning.
    pub advisory_speed_knots: f64,
    /// Pre-pipeline advisory: freight below this gets a commercial warning.
    pub advisory_min_freight: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            profit_risky_pct: 0.0,
            profit_caution_pct: 5.0,
            profit_strong_pct: 15.0,
            fuel_heavy_pct: 65.0,
            fuel_dominant_pct: 75.0,
            port_heavy_pct: 20.0,
            high_speed_knots: 18.0,
            advisory_speed_knots: 20.0,
            advisory_min_freight: 50_000.0,
        }
    }
}

impl Thresholds {
    fn validate(&self) -> anyhow::Result<()> {
        for (key, value) in [
            ("PROFIT_RISKY_PCT", self.profit_risky_pct),
            ("PROFIT_CAUTION_PCT", self.profit_caution_pct),
            ("PROFIT_STRONG_PCT", self.profit_strong_pct),
            ("FUEL_HEAVY_PCT", self.fuel_heavy_pct),
            ("FUEL_DOMINANT_PCT", self.fuel_dominant_pct),
            ("PORT_HEAVY_PCT", self.port_heavy_pct),
            ("HIGH_SPEED_KNOTS", self.high_speed_knots),
            ("ADVISORY_SPEED_KNOTS", self.advisory_speed_knots),
            ("ADVISORY_MIN_FREIGHT", self.advisory_min_freight),
        ] {
            if !value.is_finite() {
                anyhow::bail!("{} must be a finite number, got {}", key, value);
            }
        }
        if !(self.profit_risky_pct <= self.profit_caution_pct
            && self.profit_caution_pct <= self.profit_strong_pct)
        {
            anyhow::bail!(
                "Profit thresholds must be ordered: PROFIT_RISKY_PCT <= PROFIT_CAUTION_PCT <= PROFIT_STRONG_PCT"
            );
        }
        if self.fuel_heavy_pct > self.fuel_dominant_pct {
            anyhow::bail!("FUEL_HEAVY_PCT cannot exceed FUEL_DOMINANT_PCT");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// JSON file replacing the built-in route table.
    pub route_table_path: Option<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub max_body_bytes: usize,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            route_table_path: None,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
            max_body_bytes: 64 * 1024,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let t = defaults.thresholds.clone();

        let thresholds = Thresholds {
            profit_risky_pct: parse_var(&lookup, "PROFIT_RISKY_PCT", t.profit_risky_pct)?,
            profit_caution_pct: parse_var(&lookup, "PROFIT_CAUTION_PCT", t.profit_caution_pct)?,
            profit_strong_pct: parse_var(&lookup, "PROFIT_STRONG_PCT", t.profit_strong_pct)?,
            fuel_heavy_pct: parse_var(&lookup, "FUEL_HEAVY_PCT", t.fuel_heavy_pct)?,
            fuel_dominant_pct: parse_var(&lookup, "FUEL_DOMINANT_PCT", t.fuel_dominant_pct)?,
            port_heavy_pct: parse_var(&lookup, "PORT_HEAVY_PCT", t.port_heavy_pct)?,
            high_speed_knots: parse_var(&lookup, "HIGH_SPEED_KNOTS", t.high_speed_knots)?,
            advisory_speed_knots: parse_var(
                &lookup,
                "ADVISORY_SPEED_KNOTS",
                t.advisory_speed_knots,
            )?,
            advisory_min_freight: parse_var(
                &lookup,
                "ADVISORY_MIN_FREIGHT",
                t.advisory_min_freight,
            )?,
        };
        thresholds.validate()?;

        let config = Self {
            port: parse_var(&lookup, "PORT", defaults.port)?,
            route_table_path: lookup("ROUTE_TABLE_PATH").filter(|s| !s.trim().is_empty()),
            rate_limit_per_second: parse_var(
                &lookup,
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )
            .and_then(|v| {
                if v == 0 {
                    anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than zero");
                }
                Ok(v)
            })?,
            rate_limit_burst: parse_var(&lookup, "RATE_LIMIT_BURST", defaults.rate_limit_burst)
                .and_then(|v| {
                    if v == 0 {
                        anyhow::bail!("RATE_LIMIT_BURST must be greater than zero");
                    }
                    Ok(v)
                })?,
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?,
            thresholds,
        };

        tracing::debug!("Server Port: {}", config.port);
        if let Some(ref path) = config.route_table_path {
            tracing::info!("Route table file configured: {}", path);
        }
        tracing::debug!("Thresholds: {:?}", config.thresholds);

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: '{}'", key, raw)),
        _ => Ok(default),
    }
}
