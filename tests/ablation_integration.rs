//! Integration tests for ablation and sensitivity studies
//!
//! These tests verify the comparative statistics:
//! - Capability growth alone yields a measurable Combined advantage
//! - Reports keep scenario order and per-condition sample sizes
//! - Sweeps produce one row per value
//! - The shipped experiment config loads

use std::path::Path;

use capability_sim::ablation::{default_scenarios, AblationRunner, AblationScenario};
use capability_sim::core::config::ExperimentConfig;
use capability_sim::core::SweepParameter;
use capability_sim::{run_ablation_studies, sensitivity_analysis, SimulationParameters};

#[test]
fn test_capability_growth_alone_improves_combined() {
    let params = SimulationParameters::default();
    let scenario = AblationScenario::new("ablated_ratio_6x").ablated().with_growth_ratio(6.0);

    let report = run_ablation_studies(&params, &[scenario], 10).unwrap();
    let result = report.get("ablated_ratio_6x").unwrap();

    assert!(
        result.stats.combined.mean < result.stats.control.mean,
        "combined {} should beat control {}",
        result.stats.combined.mean,
        result.stats.control.mean
    );
    assert!(result.improvement_pct > 0.0);
    assert!(result.cohens_d > 0.0);
}

#[test]
fn test_default_scenarios_report_shape() {
    let params = SimulationParameters::default();
    let report = run_ablation_studies(&params, &default_scenarios(), 4).unwrap();

    let names: Vec<&str> = report.iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["full_model", "ablated_ratio_6x", "ablated_ratio_2x", "ablated_ratio_3x"]
    );

    for result in report.iter() {
        assert_eq!(result.final_performance.control.len(), 4);
        assert_eq!(result.final_performance.generic_xai.len(), 4);
        assert_eq!(result.final_performance.combined.len(), 4);
        assert_eq!(result.stats.control.n, 4);
    }

    let full = report.get("full_model").unwrap();
    assert!(!full.scenario.ablate_condition_factor);
    assert_eq!(full.parameters, params);

    let two_x = report.get("ablated_ratio_2x").unwrap();
    assert!((two_x.parameters.growth_rate_ratio() - 2.0).abs() < 1e-9);

    println!("{}", report.summary_table());
}

#[test]
fn test_larger_ratio_gives_larger_improvement() {
    let params = SimulationParameters::default();
    let report = AblationRunner::new(8)
        .with_seed(500)
        .run(&params, &default_scenarios())
        .unwrap();

    let six = report.get("ablated_ratio_6x").unwrap().improvement_pct;
    let two = report.get("ablated_ratio_2x").unwrap().improvement_pct;
    assert!(six > two, "6x ({}) should beat 2x ({})", six, two);
}

#[test]
fn test_rerun_is_identical() {
    let params = SimulationParameters::default();
    let scenarios = default_scenarios();
    let a = AblationRunner::new(3).run(&params, &scenarios).unwrap();
    let b = AblationRunner::new(3).with_parallel(false).run(&params, &scenarios).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_sensitivity_rows() {
    let params = SimulationParameters::default();
    let values = [1.0, 3.0, 6.0];
    let points = sensitivity_analysis(&params, "growth_rate_ratio", &values, 4).unwrap();

    assert_eq!(points.len(), 3);
    for (point, &value) in points.iter().zip(&values) {
        assert_eq!(point.value, value);
        assert!(point.control_mean > 0.0);
    }
    // Equal growth and no condition factor: no systematic advantage
    assert!(points[0].improvement_pct.abs() < points[2].improvement_pct);
}

#[test]
fn test_coupling_sweep_zero_has_no_capability_effect() {
    let params = SimulationParameters::default();
    let points = AblationRunner::new(6)
        .sweep(&params, SweepParameter::CapabilityCoupling, &[0.0, 0.5], true)
        .unwrap();

    // Without coupling or condition factor, arms differ only by noise
    assert!(points[0].improvement_pct.abs() < 2.0);
    assert!(points[1].improvement_pct > 5.0);
}

#[test]
fn test_shipped_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/experiment.toml");
    let config = ExperimentConfig::load(&path).unwrap();

    assert_eq!(config.parameters, SimulationParameters::default());
    assert_eq!(config.scenarios().len(), 5);
}
