//! Demo command walking the pricing pipeline through a worked example.
//!
//! The example is the reference calculation used throughout the
//! workspace: a 100 ARS direct cost sold through MercadoLibre at a 12%
//! commission, with IVA and a 40% profit target.
//!
//! # Expected Output
//!
//! ```text
//! = Final cost                135.52
//! = Final price               189.73
//! ```
//!
//! Key verification points:
//! - Commission applies to the pre-tax subtotal, not the final price
//! - IVA compounds on the post-commission cost
//! - The profit target prices off the final cost

use precio_core::model::{CostModel, Material, SalesChannel};
use precio_engine::analysis::Analyzer;

use crate::Result;

/// Builds the worked-example model: 70 ARS of materials plus two hours
/// of labor at 15 ARS/h make a 100 ARS direct cost, sold through
/// MercadoLibre at its default 12% commission.
pub(crate) fn worked_example() -> CostModel {
    let mut model = CostModel::starter();
    model.product_name = "Producto de ejemplo".to_string();
    model.materials = vec![Material {
        name: "Insumos".to_string(),
        quantity: 1.0,
        unit: "unidad".to_string(),
        unit_price: 70.0,
    }];
    model.labor_minutes = 120.0;
    model.sell_platform = SalesChannel::MercadoLibre;
    model.platform_fee = SalesChannel::MercadoLibre.default_commission_pct();
    model
}

/// Runs the pricing pipeline demonstration.
///
/// # Returns
///
/// `Ok(())` on success, `Err` on failure.
pub fn run() -> Result<()> {
    println!("========================================");
    println!("Pricing Pipeline Demo");
    println!("========================================");
    println!();

    let model = worked_example();

    println!("[Demo] Worked example model:");
    println!("  - Materials: 70.00 ARS per unit");
    println!(
        "  - Labor: {} min at {:.2} ARS/h",
        model.labor_minutes, model.hourly_rate
    );
    println!(
        "  - Channel: {} ({:.0}% commission)",
        model.sell_platform.label(),
        model.platform_fee
    );
    println!("  - IVA: 21% on the post-commission cost");
    println!("  - Profit: 40% markup on the final cost");
    println!();

    println!("[Demo] Running the analysis...");
    let analysis = Analyzer::new().analyze(&model)?;
    println!();

    let subtotal = analysis.direct_cost_per_unit
        + analysis.operative_per_unit
        + analysis.equipment_per_unit;

    println!("[Demo] Pipeline stages:");
    println!("----------------------------------------");
    stage("Material cost / unit", analysis.material_cost_per_unit);
    stage("Labor cost / unit", analysis.labor_cost_per_unit);
    stage("Direct cost / unit", analysis.direct_cost_per_unit);
    stage("Subtotal before fees", subtotal);
    stage("+ commission (12%)", analysis.platform_commission_amount);
    stage("+ IVA (21%)", analysis.iva_amount);
    stage("= Final cost", analysis.final_cost);
    stage("+ profit (40%)", analysis.profit_per_unit);
    stage("= Final price", analysis.final_price);
    println!("----------------------------------------");
    println!();

    println!("[Demo] Verification points:");
    println!(
        "  1. Commission on the pre-tax subtotal: {:.2} = 12% of {:.2}",
        analysis.platform_commission_amount, subtotal
    );
    println!(
        "  2. IVA on the post-commission cost: {:.2} = 21% of {:.2}",
        analysis.iva_amount,
        subtotal + analysis.platform_commission_amount
    );
    println!(
        "  3. Profit prices off the final cost: {:.2} = {:.2} x 1.4",
        analysis.final_price, analysis.final_cost
    );
    println!();
    println!("========================================");
    println!("Demo completed successfully!");
    println!("========================================");

    Ok(())
}

fn stage(label: &str, value: f64) {
    println!("  {:<26} {:>10.2}", label, value);
}
