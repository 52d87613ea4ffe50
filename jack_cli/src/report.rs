//! Plain-text reports for the terminal.

use std::fmt::Write;

use jack_core::calculations::{CapacityResult, FailureMode, SafetyResult};
use jack_core::config::JackConfig;
use jack_core::design::{DesignVector, DESIGN_VARIABLE_NAMES};
use jack_core::materials::JackMaterial;
use jack_core::optimization::OptimizationResult;

const RULE: &str = "═══════════════════════════════════════";

/// Five decimals, or `Not calculated` when the value is undefined
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.5}", v),
        _ => "Not calculated".to_string(),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn factor_label(mode: FailureMode) -> &'static str {
    match mode {
        FailureMode::BucklingXx => "Diagonal Buckling (x-x) Safety Factor",
        FailureMode::BucklingYy => "Diagonal Buckling (y-y) Safety Factor",
        FailureMode::Tensile => "Crossbar Tensile Safety Factor",
        FailureMode::Tearout => "Tearout Safety Factor",
        FailureMode::Bearing => "Bearing Stress Safety Factor",
        FailureMode::Axial => "Axial Stress Safety Factor",
    }
}

/// Design variables, one per line
pub fn design_report(design: &DesignVector) -> String {
    let mut out = String::new();
    for (name, value) in DESIGN_VARIABLE_NAMES.iter().zip(design.to_array()) {
        let _ = writeln!(out, "  {:<22} {} in", name, format_value(Some(value)));
    }
    out
}

/// Forces, safety factors against their targets, weight and cost
pub fn safety_report(result: &SafetyResult, config: &JackConfig) -> String {
    let targets = &config.targets;
    let mut out = String::new();

    let _ = writeln!(out, "Forces:");
    let _ = writeln!(out, "  Start angle:    {} deg", format_value(Some(result.start_angle_deg)));
    let _ = writeln!(out, "  Final angle:    {} deg", format_value(result.final_angle_deg));
    let _ = writeln!(out, "  Diagonal force: {} lbs", format_value(Some(result.diagonal_force_lb)));
    let _ = writeln!(out, "  Crossbar force: {} lbs", format_value(Some(result.crossbar_force_lb)));
    let _ = writeln!(out);

    let _ = writeln!(out, "Safety Factors:");
    for mode in FailureMode::ALL {
        let factor = result.factor(mode);
        let target = mode.target(targets);
        let _ = writeln!(
            out,
            "  {}: {} (min {}) {}",
            factor_label(mode),
            format_value(Some(factor)),
            target,
            status_icon(factor >= target)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Weight: {} lbs", format_value(Some(result.weight_lb)));
    let _ = writeln!(out, "Cost: ${}", format_value(Some(result.cost_usd)));
    let _ = writeln!(
        out,
        "RESULT: {} (governs: {})",
        if result.passes(targets) { "PASS" } else { "FAIL" },
        result.governing_mode(targets)
    );
    out
}

/// Solver outcome followed by the safety report of the final design
pub fn optimization_report(result: &OptimizationResult, config: &JackConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  OPTIMIZATION {}", if result.success { "SUCCEEDED" } else { "FAILED" });
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{}", result.message);
    let _ = writeln!(out, "Evaluations: {}", result.evaluations);
    let _ = writeln!(out);
    let _ = writeln!(out, "Design:");
    out.push_str(&design_report(&result.design));
    let _ = writeln!(out);

    let _ = writeln!(out, "Constraint Margins:");
    for margin in &result.margins {
        let _ = writeln!(
            out,
            "  {:<20} {} {}",
            margin.constraint.name(),
            format_value(margin.margin),
            status_icon(margin.is_satisfied(config.solver.feasibility_tolerance))
        );
    }
    let _ = writeln!(out);

    match &result.safety {
        Some(safety) => out.push_str(&safety_report(safety, config)),
        None => {
            let _ = writeln!(out, "Cost: ${}", format_value(Some(result.cost_usd)));
            let _ = writeln!(out, "Safety factors: Not calculated");
        }
    }
    out
}

/// Property table of every material
pub fn materials_table() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<18} {:>14} {:>10} {:>12} {:>10} {:>10}",
        "Material", "Density lb/in3", "Cost $/lb", "E psi", "S_y psi", "S_ut psi"
    );
    for material in JackMaterial::ALL {
        let p = material.properties();
        let _ = writeln!(
            out,
            "{:<18} {:>14.5} {:>10.2} {:>12.0} {:>10.0} {:>10.0}",
            material.name(),
            p.density_lb_in3,
            p.cost_per_lb,
            p.e_psi,
            p.fy_psi,
            p.fu_psi
        );
    }
    out
}

/// Failure load table
pub fn capacity_table(result: &CapacityResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<15} {:<10} {:<24} {:>12} {:>14}",
        "Location", "Mode", "Criterion", "Equation", "Strength psi", "Failure lbs"
    );
    for row in &result.rows {
        let _ = writeln!(
            out,
            "{:<16} {:<15} {:<10} {:<24} {:>12.0} {:>14}",
            row.location.to_string(),
            row.mode,
            row.criterion,
            row.equation,
            row.strength_psi,
            format_value(Some(row.failure_load_lb))
        );
    }
    if let Some(weakest) = result.weakest() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Weakest: {} {} at {} lbs", weakest.location, weakest.mode, format_value(Some(weakest.failure_load_lb)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_core::calculations::{capacity, safety_factors, CapacityInput};

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(9000.0)), "9000.00000");
        assert_eq!(format_value(Some(1.0 / 3.0)), "0.33333");
        assert_eq!(format_value(None), "Not calculated");
        assert_eq!(format_value(Some(f64::NAN)), "Not calculated");
        assert_eq!(format_value(Some(f64::INFINITY)), "Not calculated");
    }

    #[test]
    fn test_safety_report_lists_every_factor() {
        let config = JackConfig::default();
        let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 1.0, 0.75]);
        let result = safety_factors(&design, &config).unwrap();
        let report = safety_report(&result, &config);

        for mode in FailureMode::ALL {
            assert!(report.contains(factor_label(mode)));
        }
        assert!(report.contains("Diagonal force: 9000.00000 lbs"));
        assert!(report.contains("RESULT: PASS"));
    }

    #[test]
    fn test_safety_report_names_governing_failure() {
        let config = JackConfig::default();
        // Half-inch crossbar: tensile factor about 0.83 against a target of 2
        let design = DesignVector::from_array([15.0, 2.0, 2.0, 0.25, 0.5, 0.75]);
        let result = safety_factors(&design, &config).unwrap();
        let report = safety_report(&result, &config);

        assert!(report.contains("RESULT: FAIL (governs: Crossbar Tensile)"));
        assert!(report.contains("Crossbar Tensile Safety Factor: 0.82973 (min 2) [FAIL]"));
    }

    #[test]
    fn test_undefined_final_angle_is_not_calculated() {
        let config = JackConfig::default();
        // Pinned length 5 cannot reach half of the raised height
        let design = DesignVector::from_array([6.0, 2.0, 2.0, 0.25, 1.0, 0.5]);
        let result = safety_factors(&design, &config).unwrap();
        assert!(result.final_angle_deg.is_none());
        assert!(safety_report(&result, &config).contains("Final angle:    Not calculated"));
    }

    #[test]
    fn test_materials_table() {
        let table = materials_table();
        for material in JackMaterial::ALL {
            assert!(table.contains(material.name()));
        }
    }

    #[test]
    fn test_capacity_table_names_weakest_member() {
        let result = capacity::calculate(&CapacityInput::default()).unwrap();
        let table = capacity_table(&result);
        assert!(table.contains("Weakest: Cross bar Bearing Stress at 480.00000 lbs"));
    }
}
