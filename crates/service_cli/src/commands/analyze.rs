//! Analyze command implementation
//!
//! Loads a cost model from a TOML or JSON file, runs the pricing
//! pipeline, and prints the breakdown as a table or as JSON.

use std::fs;
use std::path::Path;

use tracing::info;

use precio_core::model::CostModel;
use precio_engine::analysis::{
    AnalysisResult, Analyzer, Difficulty, Recommendation, UndefinedMetric,
};

use crate::{CliError, Result};

/// Run the analyze command
pub fn run(input: &str, format: &str, no_recommendations: bool) -> Result<()> {
    info!("Starting analysis...");
    info!("  Input: {}", input);
    info!("  Output format: {}", format);

    let path = Path::new(input);
    if !path.exists() {
        return Err(CliError::FileNotFound(input.to_string()));
    }

    let model = load_model(path)?;
    let analyzer = Analyzer::new();
    let analysis = analyzer.analyze(&model)?;
    let recommendations = if no_recommendations {
        Vec::new()
    } else {
        analyzer.recommend(&analysis, &model)
    };

    match format {
        "json" => print_json(&analysis, &recommendations)?,
        "table" => print_table(&model, &analysis, &recommendations),
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            )));
        }
    }

    info!("Analysis complete");
    Ok(())
}

/// Deserialises the cost model, dispatching on the file extension.
fn load_model(path: &Path) -> Result<CostModel> {
    let raw = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&raw)?),
        Some("toml") => Ok(toml::from_str(&raw)?),
        _ => Err(CliError::InvalidArgument(format!(
            "Unrecognised input extension for {}. Supported: .toml, .json",
            path.display()
        ))),
    }
}

fn print_json(analysis: &AnalysisResult, recommendations: &[Recommendation]) -> Result<()> {
    let payload = serde_json::json!({
        "analysis": analysis,
        "recommendations": recommendations,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_table(model: &CostModel, analysis: &AnalysisResult, recommendations: &[Recommendation]) {
    if !model.product_name.is_empty() {
        println!("\nProduct: {}", model.product_name);
    }

    println!("\n┌──────────────────────────────┬────────────────┐");
    println!("│ Cost breakdown (per unit)    │            ARS │");
    println!("├──────────────────────────────┼────────────────┤");
    row("Materials", ars(analysis.material_cost_per_unit));
    row("Labor", ars(analysis.labor_cost_per_unit));
    row("Direct cost", ars(analysis.direct_cost_per_unit));
    row("Operative expenses", ars(analysis.operative_per_unit));
    row("Equipment amortisation", ars(analysis.equipment_per_unit));
    row("Platform commission", ars(analysis.platform_commission_amount));
    row("IVA", ars(analysis.iva_amount));
    println!("├──────────────────────────────┼────────────────┤");
    row("Final cost", ars(analysis.final_cost));
    row("Final price", ars(analysis.final_price));
    row("Profit per unit", ars(analysis.profit_per_unit));
    println!("└──────────────────────────────┴────────────────┘");

    println!("\n┌──────────────────────────────┬────────────────┐");
    println!("│ Monthly projection           │                │");
    println!("├──────────────────────────────┼────────────────┤");
    row("Net margin", percentage(analysis.net_margin_percentage));
    row("Hours worked", format!("{:.1} h", analysis.hours_per_month));
    row("Effective hourly rate", optional_ars(analysis.effective_hourly_rate));
    row("Monthly profit", ars(analysis.monthly_profit));
    row("Personal expenses", ars(analysis.total_personal_expenses));
    row("Contribution margin / unit", ars(analysis.contribution_margin_per_unit));
    match analysis.break_even {
        Some(point) => {
            row("Break-even units", point.units.to_string());
            row("Break-even revenue", ars(point.revenue));
        }
        None => row("Break-even", "unreachable".to_string()),
    }
    row(
        "Sustainable",
        if analysis.is_sustainable { "yes" } else { "no" }.to_string(),
    );
    println!("└──────────────────────────────┴────────────────┘");

    for metric in analysis.undefined_metrics() {
        match metric {
            UndefinedMetric::NetMargin => {
                println!("Note: net margin is undefined at a zero final price.");
            }
            UndefinedMetric::EffectiveHourlyRate => {
                println!("Note: effective hourly rate is undefined with no labor time.");
            }
        }
    }

    if !recommendations.is_empty() {
        println!("\nRecommendations:");
        for (index, rec) in recommendations.iter().enumerate() {
            println!(
                "  {}. [{}] {} (+{:.2} ARS/month)",
                index + 1,
                difficulty_label(rec.difficulty),
                rec.title,
                rec.impact
            );
            println!("     {}", rec.description);
        }
    }
}

fn row(label: &str, value: String) {
    println!("│ {:<28} │ {:>14} │", label, value);
}

fn ars(value: f64) -> String {
    format!("{:.2}", value)
}

fn optional_ars(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    }
}

fn percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "n/a".to_string(),
    }
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}
