//! Scenario files: which model to build and what to report about it.

use queuekit_models::{
    BoundedCapacitySingleServer, FinitePopulationSingleServer, ModelError, MultiServerUnbounded,
    QueueModel, UnboundedSingleServer,
};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::Time,
    time::{day, hour, minute, second},
};

/// A stationary scenario read from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// The unit rates are expressed per, and thus the unit of model times.
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Occupancy states whose probabilities are reported.
    #[serde(default = "default_report_states")]
    pub report_states: Vec<usize>,

    pub model: ModelSpec,
}

fn default_report_states() -> Vec<usize> {
    vec![0, 1]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    #[default]
    Hour,
    Day,
}

impl TimeUnit {
    /// The unit's name, singular.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
        }
    }

    /// Interpret `value` as a duration in this unit.
    #[must_use]
    pub fn time(self, value: f64) -> Time {
        match self {
            TimeUnit::Second => Time::new::<second>(value),
            TimeUnit::Minute => Time::new::<minute>(value),
            TimeUnit::Hour => Time::new::<hour>(value),
            TimeUnit::Day => Time::new::<day>(value),
        }
    }
}

/// The model named by a scenario, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModelSpec {
    Unbounded {
        arrival_rate: f64,
        service_rate: f64,
    },
    BoundedCapacity {
        arrival_rate: f64,
        service_rate: f64,
        capacity: usize,
    },
    FinitePopulation {
        arrival_rate: f64,
        service_rate: f64,
        population_size: usize,
    },
    MultiServer {
        arrival_rate: f64,
        service_rate: f64,
        server_count: usize,
    },
}

impl ModelSpec {
    /// The `kind` tag as written in scenario files.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ModelSpec::Unbounded { .. } => "unbounded",
            ModelSpec::BoundedCapacity { .. } => "bounded-capacity",
            ModelSpec::FinitePopulation { .. } => "finite-population",
            ModelSpec::MultiServer { .. } => "multi-server",
        }
    }

    /// Construct the model.
    ///
    /// # Errors
    ///
    /// Returns the model's construction error if the parameters are invalid.
    pub fn build(&self) -> Result<Model, ModelError> {
        Ok(match *self {
            ModelSpec::Unbounded {
                arrival_rate,
                service_rate,
            } => Model::Unbounded(UnboundedSingleServer::new(arrival_rate, service_rate)?),
            ModelSpec::BoundedCapacity {
                arrival_rate,
                service_rate,
                capacity,
            } => Model::BoundedCapacity(BoundedCapacitySingleServer::new(
                arrival_rate,
                service_rate,
                capacity,
            )?),
            ModelSpec::FinitePopulation {
                arrival_rate,
                service_rate,
                population_size,
            } => Model::FinitePopulation(FinitePopulationSingleServer::new(
                arrival_rate,
                service_rate,
                population_size,
            )?),
            ModelSpec::MultiServer {
                arrival_rate,
                service_rate,
                server_count,
            } => Model::MultiServer(MultiServerUnbounded::new(
                arrival_rate,
                service_rate,
                server_count,
            )?),
        })
    }
}

/// A constructed model of any kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Model {
    Unbounded(UnboundedSingleServer),
    BoundedCapacity(BoundedCapacitySingleServer),
    FinitePopulation(FinitePopulationSingleServer),
    MultiServer(MultiServerUnbounded),
}

impl Model {
    #[must_use]
    pub fn as_queue_model(&self) -> &dyn QueueModel {
        match self {
            Model::Unbounded(model) => model,
            Model::BoundedCapacity(model) => model,
            Model::FinitePopulation(model) => model,
            Model::MultiServer(model) => model,
        }
    }
}

impl Scenario {
    /// Parse a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scenario.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// An air-conditioning repair crew looking after five customers.
    ///
    /// Each customer's unit breaks down 0.4 times a day and the crew repairs
    /// 12 units a day, both exponentially distributed. Rates are per hour.
    #[must_use]
    pub fn repair_crew() -> Self {
        Self {
            time_unit: TimeUnit::Hour,
            report_states: default_report_states(),
            model: ModelSpec::FinitePopulation {
                arrival_rate: (2.0 / 5.0) / 24.0,
                service_rate: 12.0 / 24.0,
                population_size: 5,
            },
        }
    }
}
