//! Simulator configuration file support.
//!
//! Every section is optional: a missing key falls back to the illustrative
//! defaults of the UmojaMath simulator, so an empty file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorContext, SimError, SimResult};
use crate::models::{
    pricing::default_tiers, AdvertisingScenario, Harmonic, PricingMode, PricingSchedule,
    PricingTier, ProfitModel, ScheduleMode, SchedulingProblem, SeasonalityModel,
};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "UMOJA_CONFIG";

/// Complete simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub server: ServerSettings,
    pub chart: ChartSettings,
    pub pricing: PricingSettings,
    pub advertising: AdvertisingSettings,
    pub profit: ProfitSettings,
    pub seasonality: SeasonalitySettings,
    pub scheduling: SchedulingSettings,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_points() -> usize {
    200
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            points: default_points(),
        }
    }
}

/// Tier table, billing mode and the default plan shown on first load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    pub mode: PricingMode,
    pub tiers: Vec<PricingTier>,
    pub hours: f64,
    pub max_hours: f64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            mode: PricingMode::default(),
            tiers: default_tiers(),
            hours: 8.0,
            max_hours: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvertisingSettings {
    pub budget: f64,
    pub max_reach: f64,
    pub growth_rate: f64,
    pub cpm: f64,
    pub target_fraction: f64,
    pub max_budget: f64,
}

impl Default for AdvertisingSettings {
    fn default() -> Self {
        let scenario = AdvertisingScenario::default();
        Self {
            budget: scenario.budget,
            max_reach: scenario.max_reach,
            growth_rate: scenario.growth_rate,
            cpm: scenario.cpm,
            target_fraction: 0.8,
            max_budget: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitSettings {
    pub fixed_cost: f64,
    pub variable_cost_per_student: f64,
    pub price_per_student: f64,
    pub scaling_factor: f64,
    pub students: f64,
    pub max_students: f64,
}

impl Default for ProfitSettings {
    fn default() -> Self {
        let model = ProfitModel::default();
        Self {
            fixed_cost: model.fixed_cost,
            variable_cost_per_student: model.variable_cost_per_student,
            price_per_student: model.price_per_student,
            scaling_factor: model.scaling_factor,
            students: 50.0,
            max_students: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalitySettings {
    pub baseline: f64,
    pub amplitude: f64,
    pub period: f64,
    pub phase: f64,
    pub harmonic: Option<Harmonic>,
    pub month: f64,
}

impl Default for SeasonalitySettings {
    fn default() -> Self {
        let model = SeasonalityModel::default();
        Self {
            baseline: model.baseline,
            amplitude: model.amplitude,
            period: model.period,
            phase: model.phase,
            harmonic: model.harmonic,
            month: 9.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingSettings {
    pub mode: ScheduleMode,
    pub problem: SchedulingProblem,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            mode: ScheduleMode::default(),
            problem: SchedulingProblem::sample(),
        }
    }
}

fn config_error(message: String, path: &Path) -> SimError {
    SimError::Configuration {
        message,
        context: ErrorContext::new("config.load").with_details(path.display().to_string()),
    }
}

impl SimulatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e), path))?;

        let config = Self::from_toml_str(&content).map_err(|e| SimError::Configuration {
            message: e.message().to_string(),
            context: e
                .context()
                .clone()
                .with_details(path.display().to_string()),
        })?;
        log::info!("Loaded simulator configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> SimResult<Self> {
        let config: SimulatorConfig = toml::from_str(content).map_err(|e| {
            SimError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration the server should run with.
    ///
    /// Searches in order:
    /// 1. The file named by `UMOJA_CONFIG` (must exist)
    /// 2. `simulator.toml`
    /// 3. `backend/simulator.toml`
    /// 4. `../simulator.toml`
    ///
    /// Falls back to built-in defaults when no file is found, then applies
    /// `HOST` / `PORT` overrides.
    pub fn load() -> SimResult<Self> {
        let mut config = match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::from_default_location()?.unwrap_or_else(|| {
                log::info!("No simulator.toml found, using built-in defaults");
                Self::default()
            }),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// First `simulator.toml` in the standard locations, if any.
    pub fn from_default_location() -> SimResult<Option<Self>> {
        let search_paths = [
            PathBuf::from("simulator.toml"),
            PathBuf::from("backend/simulator.toml"),
            PathBuf::from("../simulator.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Apply `HOST` and `PORT` from the environment.
    pub fn apply_env_overrides(&mut self) -> SimResult<()> {
        if let Ok(host) = env::var("HOST") {
            if !host.trim().is_empty() {
                self.server.host = host.trim().to_string();
            }
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                SimError::Configuration {
                    message: format!("PORT must be a port number, got '{}'", port),
                    context: ErrorContext::new("config.env").with_parameter("PORT"),
                }
            })?;
        }
        Ok(())
    }

    /// Check every section builds a valid model.
    pub fn validate(&self) -> SimResult<()> {
        let as_config = |e: SimError| SimError::Configuration {
            message: e.message().to_string(),
            context: e.context().clone(),
        };
        self.pricing_schedule().map_err(as_config)?;
        self.advertising_scenario().map_err(as_config)?;
        self.profit_model().map_err(as_config)?;
        self.seasonality_model().map_err(as_config)?;
        self.scheduling.problem.validate().map_err(as_config)?;
        if !(2..=crate::services::numeric::MAX_CHART_POINTS).contains(&self.chart.points) {
            return Err(SimError::Configuration {
                message: format!("chart.points out of range: {}", self.chart.points),
                context: ErrorContext::new("config.validate").with_parameter("chart.points"),
            });
        }
        Ok(())
    }

    pub fn pricing_schedule(&self) -> SimResult<PricingSchedule> {
        PricingSchedule::new(self.pricing.tiers.clone(), self.pricing.mode)
    }

    pub fn advertising_scenario(&self) -> SimResult<AdvertisingScenario> {
        AdvertisingScenario::new(
            self.advertising.budget,
            self.advertising.max_reach,
            self.advertising.growth_rate,
        )?
        .with_cpm(self.advertising.cpm)
    }

    pub fn profit_model(&self) -> SimResult<ProfitModel> {
        ProfitModel::new(
            self.profit.fixed_cost,
            self.profit.variable_cost_per_student,
            self.profit.price_per_student,
            self.profit.scaling_factor,
        )
    }

    pub fn seasonality_model(&self) -> SimResult<SeasonalityModel> {
        let model = SeasonalityModel {
            baseline: self.seasonality.baseline,
            amplitude: self.seasonality.amplitude,
            period: self.seasonality.period,
            phase: self.seasonality.phase,
            harmonic: self.seasonality.harmonic.clone(),
        };
        model.validate()?;
        Ok(model)
    }
}
