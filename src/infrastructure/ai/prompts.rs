//! Prompt templates for the docking-analysis model calls
//!
//! `{placeholder}` slots are filled by the builder functions below.

use crate::domain::simulation::DockingJob;

pub const REPORT_PROMPT: &str = r#"You are a molecular biology AI agent generating a comprehensive docking analysis report.

SIMULATION DATA:
- Target Protein: {protein_target}
- Ligand: {ligand_name}
- Binding Affinity: {binding_affinity} kcal/mol
- RMSD: {rmsd} A
- Ligand Efficiency: {ligand_efficiency} kcal/mol/HA
- Inhibition Constant (Ki): {inhibition_constant} nM
{interaction_data}

Generate a detailed scientific report in JSON format with the following structure:
{
  "executiveSummary": "A 2-3 sentence summary of the key findings and binding efficacy. Be specific about the binding affinity, stability, and drug potential.",
  "fullContent": "A comprehensive analysis covering: (1) Binding characteristics, (2) Interaction profile analysis, (3) Drug efficacy predictions, (4) Recommendations for lead optimization. Use scientific terminology appropriate for grant proposals and research papers.",
  "performanceMetrics": {
    "bindingEnergy": number,
    "ligandEfficiency": number,
    "inhibitionConstant": number,
    "stabilityScore": number (0-100),
    "drugLikenessScore": number (0-100),
    "toxicityRisk": "low" | "medium" | "high"
  }
}

Make this sound professional, data-driven, and suitable for stakeholder presentations and research publications.
"#;

pub const CATEGORIZATION_PROMPT: &str = r#"Analyze this molecular docking simulation and generate categorization tags:

Protein: {protein_target}
Ligand: {ligand_name}
Binding Affinity: {binding_affinity} kcal/mol

Generate tags in JSON format:
{
  "tags": [
    { "type": "protein_family", "value": "..." },
    { "type": "therapeutic_area", "value": "..." },
    { "type": "binding_strength", "value": "strong" | "moderate" | "weak" },
    { "type": "drug_class", "value": "..." }
  ]
}

Based on the binding affinity:
- Strong: < -9.0 kcal/mol
- Moderate: -9.0 to -7.0 kcal/mol
- Weak: > -7.0 kcal/mol
"#;

/// Build the report-generation prompt for a job
pub fn build_report_prompt(job: &DockingJob) -> String {
    let interaction_data = job
        .interaction_data
        .as_ref()
        .map(|data| format!("- Interaction Data: {}", data))
        .unwrap_or_default();

    REPORT_PROMPT
        .replace("{protein_target}", &job.protein_target)
        .replace("{ligand_name}", &job.ligand_name)
        .replace("{binding_affinity}", &job.binding_affinity.to_string())
        .replace("{rmsd}", &job.rmsd.to_string())
        .replace("{ligand_efficiency}", &optional_metric(job.ligand_efficiency))
        .replace(
            "{inhibition_constant}",
            &optional_metric(job.inhibition_constant),
        )
        .replace("{interaction_data}", &interaction_data)
}

/// Build the categorization prompt from the job's core attributes
pub fn build_categorization_prompt(
    protein_target: &str,
    ligand_name: &str,
    binding_affinity: f64,
) -> String {
    CATEGORIZATION_PROMPT
        .replace("{protein_target}", protein_target)
        .replace("{ligand_name}", ligand_name)
        .replace("{binding_affinity}", &binding_affinity.to_string())
}

fn optional_metric(value: Option<f64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}
