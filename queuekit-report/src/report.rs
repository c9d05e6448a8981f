//! Evaluation of a scenario into a printable report.

use std::fmt;

use queuekit_models::{ModelError, PnStrategy, QueueModel, Summary};
use serde::Serialize;
use uom::si::time::minute;

use crate::scenario::{Model, Scenario, TimeUnit};

/// Everything printed for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: &'static str,
    pub time_unit: TimeUnit,
    pub summary: Summary,
    pub states: Vec<StateProbability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_crew: Option<RepairCrew>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateProbability {
    pub n: usize,
    pub probability: f64,
}

/// Answers to the usual questions about a finite-population repair shop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepairCrew {
    /// Mean number of units broken, waiting or under repair.
    pub mean_units_out_of_service: f64,
    /// Mean time from breakdown until the unit is repaired, in minutes.
    pub mean_minutes_until_repaired: f64,
    /// Probability that two or more units are out of service at once.
    pub probability_two_or_more_out: f64,
}

impl Report {
    /// Build the scenario's model and evaluate every reported quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the model cannot be built or a requested
    /// state lies above its ceiling.
    pub fn evaluate(scenario: &Scenario) -> Result<Self, ModelError> {
        let model = scenario.model.build()?;
        let queue = model.as_queue_model();

        let states = scenario
            .report_states
            .iter()
            .map(|&n| {
                Ok(StateProbability {
                    n,
                    probability: queue.probability_n_units(n)?,
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let repair_crew = match model {
            Model::FinitePopulation(shop) => {
                let p0 = shop.probability_zero_units();
                let p1 = shop.probability_n_units_with(1, PnStrategy::ClosedForm)?;

                Some(RepairCrew {
                    mean_units_out_of_service: shop.mean_units_in_system(),
                    mean_minutes_until_repaired: scenario
                        .time_unit
                        .time(shop.mean_time_in_system())
                        .get::<minute>(),
                    probability_two_or_more_out: 1.0 - (p0 + p1),
                })
            }
            _ => None,
        };

        Ok(Self {
            kind: scenario.model.kind(),
            time_unit: scenario.time_unit,
            summary: queue.summary(),
            states,
            repair_crew,
        })
    }

    /// Encode the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn minutes(&self, value: f64) -> f64 {
        self.time_unit.time(value).get::<minute>()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        let unit = self.time_unit.name();
        let title = format!("Steady-state results for the {} model", self.kind);

        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f)?;
        writeln!(f, "Arrival rate:            {:.4} per {unit}", s.arrival_rate)?;
        writeln!(f, "Service rate:            {:.4} per {unit}", s.service_rate)?;
        writeln!(f, "Utilization:             {:.4}", s.utilization)?;
        writeln!(f, "Mean units in system:    {:.4}", s.mean_units_in_system)?;
        writeln!(f, "Mean units in queue:     {:.4}", s.mean_units_in_queue)?;
        writeln!(f, "Mean idle servers:       {:.4}", s.mean_idle_servers)?;
        writeln!(
            f,
            "Mean time in queue:      {:.2} minutes",
            self.minutes(s.mean_time_in_queue)
        )?;
        writeln!(
            f,
            "Mean time in system:     {:.2} minutes",
            self.minutes(s.mean_time_in_system)
        )?;
        writeln!(
            f,
            "Mean service time:       {:.2} minutes",
            self.minutes(s.mean_service_time)
        )?;

        if !self.states.is_empty() {
            writeln!(f)?;
            for state in &self.states {
                writeln!(
                    f,
                    "P({:>3} units):           {:.2} %",
                    state.n,
                    state.probability * 100.0
                )?;
            }
        }

        if let Some(crew) = &self.repair_crew {
            writeln!(f)?;
            writeln!(
                f,
                "Mean units out of service:                       {:.2}",
                crew.mean_units_out_of_service
            )?;
            writeln!(
                f,
                "Mean time until a unit is repaired:              {:.2} minutes",
                crew.mean_minutes_until_repaired
            )?;
            writeln!(
                f,
                "Probability that 2 or more units are out of service: {:.2} %",
                crew.probability_two_or_more_out * 100.0
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::scenario::ModelSpec;

    #[test]
    fn repair_crew_answers() {
        let report = Report::evaluate(&Scenario::repair_crew()).unwrap();
        let crew = report.repair_crew.expect("finite population has a crew section");

        assert_abs_diff_eq!(crew.mean_units_out_of_service, 0.18333, epsilon = 1e-4);
        assert_abs_diff_eq!(crew.mean_minutes_until_repaired, 137.022, epsilon = 1e-2);
        assert_abs_diff_eq!(crew.probability_two_or_more_out, 0.020648, epsilon = 1e-5);
        assert_eq!(report.states.len(), 2);
        assert_abs_diff_eq!(report.states[0].probability, 0.839444, epsilon = 1e-5);
    }

    #[test]
    fn text_report_mentions_every_section() {
        let text = Report::evaluate(&Scenario::repair_crew()).unwrap().to_string();

        assert!(text.starts_with("Steady-state results for the finite-population model"));
        assert!(text.contains("Mean units in system:    0.1833"));
        assert!(text.contains("Mean time until a unit is repaired:              137.02 minutes"));
        assert!(text.contains("Probability that 2 or more units are out of service: 2.06 %"));
    }

    #[test]
    fn other_models_have_no_crew_section() {
        let scenario = Scenario {
            time_unit: TimeUnit::Hour,
            report_states: vec![0, 3],
            model: ModelSpec::MultiServer {
                arrival_rate: 80.0,
                service_rate: 50.0,
                server_count: 2,
            },
        };

        let report = Report::evaluate(&scenario).unwrap();
        assert!(report.repair_crew.is_none());

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "multi-server");
        assert_eq!(json["time_unit"], "hour");
        assert_eq!(json["states"][1]["n"], 3);
        assert!(json.get("repair_crew").is_none());
    }

    #[test]
    fn states_above_the_ceiling_fail() {
        let scenario = Scenario {
            report_states: vec![6],
            ..Scenario::repair_crew()
        };

        assert_eq!(
            Report::evaluate(&scenario),
            Err(ModelError::StateOutOfRange { n: 6, ceiling: 5 })
        );
    }
}
