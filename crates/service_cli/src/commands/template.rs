//! Template command implementation
//!
//! Emits the starter cost model as a TOML file an operator can fill in
//! and feed back through `precio analyze`.

use std::fs;

use tracing::info;

use precio_core::model::CostModel;

use crate::Result;

/// Run the template command
pub fn run(output: Option<&str>) -> Result<()> {
    let rendered = toml::to_string_pretty(&CostModel::starter())?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            info!("Template written to {}", path);
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
