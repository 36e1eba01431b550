//! Check command implementation
//!
//! Runs the pipeline against its reference figures and round-trips the
//! cost model through both serialisation formats, so a broken build or
//! a drifted constant shows up before any real model is analysed.

use tracing::info;

use precio_core::model::CostModel;
use precio_engine::analysis::Analyzer;

use crate::{CliError, Result};

/// Run the check command
pub fn run() -> Result<()> {
    info!("Checking environment...");

    println!("precio {}", env!("CARGO_PKG_VERSION"));
    println!();

    let mut failures = Vec::new();
    report("starter model pipeline", starter_pipeline(), &mut failures);
    report("worked example pipeline", worked_example_pipeline(), &mut failures);
    report("JSON round-trip", json_round_trip(), &mut failures);
    report("TOML round-trip", toml_round_trip(), &mut failures);
    println!();

    if failures.is_empty() {
        println!("All checks passed.");
        Ok(())
    } else {
        Err(CliError::CheckFailed(failures.join(", ")))
    }
}

fn report(name: &str, outcome: std::result::Result<(), String>, failures: &mut Vec<String>) {
    match outcome {
        Ok(()) => println!("[OK]   {}", name),
        Err(detail) => {
            println!("[FAIL] {}: {}", name, detail);
            failures.push(name.to_string());
        }
    }
}

/// The starter model prices at 9.075 cost and 12.705 final price.
fn starter_pipeline() -> std::result::Result<(), String> {
    let analysis = Analyzer::new()
        .analyze(&CostModel::starter())
        .map_err(|err| err.to_string())?;
    expect_close("final cost", analysis.final_cost, 9.075)?;
    expect_close("final price", analysis.final_price, 12.705)
}

/// The worked example prices at 135.52 cost and 189.728 final price.
fn worked_example_pipeline() -> std::result::Result<(), String> {
    let analysis = Analyzer::new()
        .analyze(&super::demo::worked_example())
        .map_err(|err| err.to_string())?;
    expect_close("final cost", analysis.final_cost, 135.52)?;
    expect_close("final price", analysis.final_price, 189.728)
}

fn json_round_trip() -> std::result::Result<(), String> {
    let model = CostModel::starter();
    let encoded = serde_json::to_string(&model).map_err(|err| err.to_string())?;
    let decoded: CostModel = serde_json::from_str(&encoded).map_err(|err| err.to_string())?;
    if decoded == model {
        Ok(())
    } else {
        Err("decoded model differs from the original".to_string())
    }
}

fn toml_round_trip() -> std::result::Result<(), String> {
    let model = CostModel::starter();
    let encoded = toml::to_string_pretty(&model).map_err(|err| err.to_string())?;
    let decoded: CostModel = toml::from_str(&encoded).map_err(|err| err.to_string())?;
    if decoded == model {
        Ok(())
    } else {
        Err("decoded model differs from the original".to_string())
    }
}

fn expect_close(name: &str, actual: f64, expected: f64) -> std::result::Result<(), String> {
    if (actual - expected).abs() < 1e-9 {
        Ok(())
    } else {
        Err(format!("{} was {}, expected {}", name, actual, expected))
    }
}
