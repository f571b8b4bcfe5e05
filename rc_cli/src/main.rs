//! # rc_cli - Concrete Design CLI
//!
//! Terminal interface for the rc_core design engine. Prompts for beam
//! geometry and line loads, runs the governing ACI load combination and
//! a complete beam design, and prints the results with a JSON block for
//! downstream tooling.

use std::io::{self, BufRead, Write};

use rc_core::calculations::beam::{design_beam, BeamInput};
use rc_core::calculations::section::RectSection;
use rc_core::loads::{CombinationSet, LoadCase, LoadType};
use rc_core::materials::{ConcreteClass, SteelGrade};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    env_logger::init();

    println!("rc_cli - Reinforced Concrete Beam Designer (ACI 318M-25)");
    println!("========================================================");
    println!();

    let span_m = prompt_f64("Enter beam span (m) [6.0]: ", 6.0);
    let width_mm = prompt_f64("Enter section width (mm) [300]: ", 300.0);
    let height_mm = prompt_f64("Enter section height (mm) [600]: ", 600.0);
    let dead_knm = prompt_f64("Enter dead line load (kN/m) [12.0]: ", 12.0);
    let live_knm = prompt_f64("Enter live line load (kN/m) [9.0]: ", 9.0);

    println!();
    println!("Designing f'c = 28 MPa / Grade 420 beam...");
    println!();

    let loads = LoadCase::new("CLI demo")
        .with_load(LoadType::Dead, dead_knm)
        .with_load(LoadType::Live, live_knm);

    let strength = loads.governing(CombinationSet::Strength);
    let service = loads.governing(CombinationSet::Service);

    let span_mm = span_m * 1000.0;
    let wu = strength.factored_value;
    let mu = wu * span_m * span_m / 8.0;
    let vu = wu * span_m / 2.0;
    let m_service = service.factored_value * span_m * span_m / 8.0;

    let input = BeamInput {
        label: "CLI-Demo".to_string(),
        section: RectSection::with_estimated_depth(width_mm, height_mm, 40.0),
        span_mm,
        concrete: ConcreteClass::Fc28,
        steel: SteelGrade::G420,
        mu_knm: mu,
        vu_kn: vu,
        service_moment_knm: Some(m_service),
    };

    match design_beam(&input) {
        Ok(design) => {
            println!("═══════════════════════════════════════");
            println!("  BEAM DESIGN RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Span:     {:.1} m", span_m);
            println!("  Section:  {:.0} x {:.0} mm", width_mm, height_mm);
            println!(
                "  Loads:    D = {:.1}, L = {:.1} kN/m",
                dead_knm, live_knm
            );
            println!(
                "  Governing combination: {} ({})",
                strength.name, strength.formula
            );
            println!();
            println!("Demand:");
            println!("  Mu = {:.1} kN·m", mu);
            println!("  Vu = {:.1} kN", vu);
            println!();
            println!("Reinforcement:");
            println!(
                "  Tension:  {} (As = {:.0} mm²)",
                design.flexure.tension_bars.callout(),
                design.flexure.required_area_mm2
            );
            if let Some(compression) = &design.flexure.compression_bars {
                println!(
                    "  Compression: {} (As' = {:.0} mm²)",
                    compression.callout(),
                    design.flexure.compression_area_mm2
                );
            }
            match design.stirrups.bar {
                Some(bar) => println!(
                    "  Stirrups: {} @ {:.0} mm",
                    bar.designation(),
                    design.stirrups.spacing_mm
                ),
                None => println!("  Stirrups: not required"),
            }
            println!();
            println!("Capacity Checks:");
            println!(
                "  Moment: {:.2} ({:.1}/{:.1} kN·m) {}",
                mu / design.moment_capacity_knm,
                mu,
                design.moment_capacity_knm,
                status_icon(mu <= design.moment_capacity_knm)
            );
            println!(
                "  Shear:  {:.2} ({:.1}/{:.1} kN) {}",
                vu / design.shear_capacity_kn,
                vu,
                design.shear_capacity_kn,
                status_icon(vu <= design.shear_capacity_kn)
            );
            if let Some(deflection) = &design.deflection {
                println!(
                    "  Deflection: {:.1} mm vs {:.1} mm limit {}",
                    deflection.deflection_mm,
                    deflection.limit_mm,
                    status_icon(deflection.ok)
                );
            }
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {} (governs: {})",
                if design.passes() { "PASS" } else { "FAIL" },
                design.governing_condition()
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&design) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
