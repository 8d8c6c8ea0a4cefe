//! Insight aggregation service
//!
//! Read-only summary statistics and heuristic recommendations over the full
//! job set, consumed by the dashboard. Never mutates data; the recommendation
//! order is part of the contract and covered by tests.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::domain::simulation::{IJobRepository, JobFilter, JobStatus, SimulationError};

/// Ordered substring rules mapping protein targets to therapeutic areas.
/// Evaluated top to bottom, first match wins.
const THERAPEUTIC_AREA_RULES: &[(&[&str], &str)] = &[
    (&["EGFR", "JAK", "kinase"], "Oncology"),
    (&["SARS", "viral", "protease"], "Antiviral"),
    (&["HSP", "heat"], "Cancer"),
    (&["ACE", "cardio"], "Cardiovascular"),
];

const DEFAULT_THERAPEUTIC_AREA: &str = "General Research";

/// Dashboard summary payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Total number of jobs, any status
    pub total_simulations: usize,
    /// Share of analyzed jobs, rendered as a rounded percentage
    pub success_rate: String,
    /// Mean binding affinity across all jobs, rounded to two decimals
    pub average_binding_affinity: f64,
    /// Distinct protein targets in first-seen order
    pub protein_targets: Vec<String>,
    /// Distinct therapeutic areas in first-seen order
    pub therapeutic_areas: Vec<String>,
    /// Heuristic recommendations; order is significant
    pub recommendations: Vec<String>,
    /// Human-readable note about the most recent submission
    pub recent_activity: String,
}

impl Insights {
    /// The defined payload for an empty job set: onboarding guidance, not an
    /// error.
    fn empty_state() -> Self {
        Self {
            total_simulations: 0,
            success_rate: "0%".to_string(),
            average_binding_affinity: 0.0,
            protein_targets: Vec::new(),
            therapeutic_areas: Vec::new(),
            recommendations: vec![
                "No simulations yet. Submit your first docking job to get started!".to_string(),
                "Use the 'New Simulation' button to add protein-ligand docking data.".to_string(),
                "The AI agent will automatically analyze your submissions.".to_string(),
            ],
            recent_activity: "Waiting for data...".to_string(),
        }
    }
}

/// Computes dashboard insights over the job store
pub struct InsightAggregator {
    jobs: Arc<dyn IJobRepository>,
}

impl InsightAggregator {
    /// Create a new aggregator
    pub fn new(jobs: Arc<dyn IJobRepository>) -> Self {
        Self { jobs }
    }

    /// Summarize the current job set
    #[instrument(skip(self))]
    pub async fn summarize(&self) -> Result<Insights, SimulationError> {
        let jobs = self.jobs.list(&JobFilter::default()).await?;

        if jobs.is_empty() {
            return Ok(Insights::empty_state());
        }

        let total = jobs.len();
        let analyzed = jobs
            .iter()
            .filter(|j| j.status == JobStatus::Analyzed)
            .count();
        let processing = jobs
            .iter()
            .filter(|j| j.status == JobStatus::Processing)
            .count();

        let avg_affinity =
            jobs.iter().map(|j| j.binding_affinity).sum::<f64>() / total as f64;

        let mut protein_targets: Vec<String> = Vec::new();
        for job in &jobs {
            if !protein_targets.contains(&job.protein_target) {
                protein_targets.push(job.protein_target.clone());
            }
        }

        let mut therapeutic_areas: Vec<String> = Vec::new();
        for target in &protein_targets {
            let area = classify_therapeutic_area(target).to_string();
            if !therapeutic_areas.contains(&area) {
                therapeutic_areas.push(area);
            }
        }

        let mut recommendations = Vec::new();

        // Strongest binder first: minimum (most negative) affinity.
        if let Some(best) = jobs.iter().min_by(|a, b| {
            a.binding_affinity
                .partial_cmp(&b.binding_affinity)
                .unwrap_or(std::cmp::Ordering::Equal)
        }) {
            recommendations.push(format!(
                "Strong binding detected: {} with {} ({} kcal/mol)",
                best.protein_target, best.ligand_name, best.binding_affinity
            ));
        }

        if processing > 0 {
            recommendations.push(format!(
                "{} simulation(s) currently being processed by the AI agent.",
                processing
            ));
        }

        if analyzed > 0 {
            recommendations.push(format!(
                "{} of {} simulations fully analyzed ({}% complete).",
                analyzed,
                total,
                percentage(analyzed, total)
            ));
        }

        if let Some((target, count)) = most_studied_target(&protein_targets, &jobs) {
            recommendations.push(format!(
                "Most studied target: {} with {} simulation(s).",
                target, count
            ));
        }

        let recent_activity = jobs
            .iter()
            .map(|j| j.created_at)
            .max()
            .map(|at| format!("Last activity: {}", at.to_rfc3339()))
            .unwrap_or_else(|| "No recent activity".to_string());

        Ok(Insights {
            total_simulations: total,
            success_rate: format!("{}%", percentage(analyzed, total)),
            average_binding_affinity: (avg_affinity * 100.0).round() / 100.0,
            protein_targets,
            therapeutic_areas,
            recommendations,
            recent_activity,
        })
    }
}

/// Classify a protein target into a therapeutic area via the ordered rules
fn classify_therapeutic_area(target: &str) -> &'static str {
    for &(needles, area) in THERAPEUTIC_AREA_RULES {
        if needles.iter().any(|needle| target.contains(needle)) {
            return area;
        }
    }
    DEFAULT_THERAPEUTIC_AREA
}

fn percentage(part: usize, whole: usize) -> u32 {
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Most frequent target; ties resolve to the first-seen target
fn most_studied_target<'a>(
    targets_in_order: &'a [String],
    jobs: &[crate::domain::simulation::DockingJob],
) -> Option<(&'a String, usize)> {
    let mut best: Option<(&String, usize)> = None;
    for target in targets_in_order {
        let count = jobs.iter().filter(|j| &j.protein_target == target).count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((target, count)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rules_first_match_wins() {
        assert_eq!(classify_therapeutic_area("EGFR-TK"), "Oncology");
        assert_eq!(classify_therapeutic_area("JAK2"), "Oncology");
        assert_eq!(classify_therapeutic_area("SARS-CoV-2 Mpro"), "Antiviral");
        // "protease" also matches the viral rule before anything else
        assert_eq!(classify_therapeutic_area("HIV protease"), "Antiviral");
        assert_eq!(classify_therapeutic_area("HSP90"), "Cancer");
        assert_eq!(classify_therapeutic_area("ACE2"), "Cardiovascular");
        assert_eq!(classify_therapeutic_area("Unknown target"), "General Research");
    }

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
    }
}
