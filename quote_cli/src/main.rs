//! # Fan Quoting CLI
//!
//! Terminal front end for the axial fan quoting engine. Walks through one
//! quote: pick a fan from the builtin range, choose blades, motor, and
//! markup, then print the priced breakdown and its JSON payload.

use std::io::{self, BufRead, Write};

use quote_core::catalog::{MountType, BUILTIN_CATALOG};
use quote_core::quote::{calculate_quote, MotorSelection, QuoteRequest};
use quote_core::rates::BUILTIN_RATES;

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return None;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_string(prompt: &str, default: &str) -> String {
    prompt_line(prompt).unwrap_or_else(|| default.to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() {
    println!("Fan Quoting CLI - Axial Fan Component Calculator");
    println!("================================================");
    println!();

    let catalog = &*BUILTIN_CATALOG;
    let rates = &*BUILTIN_RATES;

    println!("Available fans:");
    for fan in catalog.fans_sorted() {
        println!(
            "  {}  (fan {:.0} mm, hub {:.0} mm, {} blades)",
            fan.uid, fan.fan_size_mm, fan.hub_size_mm, fan.blade_name
        );
    }
    println!();

    let uid = prompt_string("Fan [Ø762-Ø472]: ", "Ø762-Ø472");
    let fan = match catalog.fan_by_uid(&uid) {
        Ok(fan) => fan,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let default_blades = fan.available_blade_qtys.first().copied().unwrap_or(10);
    let blades = prompt_u32(
        &format!(
            "Blade quantity {:?} [{}]: ",
            fan.available_blade_qtys, default_blades
        ),
        default_blades,
    );

    let default_kw = fan.available_motor_kw.last().copied().unwrap_or(45);
    let kw = prompt_u32(
        &format!("Motor rating kW {:?} [{}]: ", fan.available_motor_kw, default_kw),
        default_kw,
    );
    let motor = catalog
        .motors_sorted()
        .into_iter()
        .find(|m| m.rated_output_kw == f64::from(kw) && m.poles == fan.motor_pole);
    if motor.is_none() {
        println!("No {}kW {}P motor in the price book; quoting without a motor.", kw, fan.motor_pole);
    }

    let mount = MountType::from_code(&prompt_string("Mount (foot/flange) [foot]: ", "foot"))
        .unwrap_or(MountType::Foot);

    let markup = prompt_f64(
        &format!("Markup fraction [{}]: ", rates.default_markup),
        rates.default_markup,
    );

    // Structural set plus the rotor.
    let mut components = fan.auto_selected_components.clone();
    components.push(7);

    let mut request = QuoteRequest::new(fan.id, components);
    request.blade_quantity = Some(blades);
    request.markup_override = Some(markup);
    if let Some(motor) = motor {
        request.motor = Some(MotorSelection {
            motor_id: motor.id,
            mount_type: mount,
        });
    }

    println!();
    match calculate_quote(&request, catalog, rates) {
        Ok(totals) => {
            println!("═══════════════════════════════════════════════");
            println!("  QUOTE SUMMARY - {}", totals.fan_uid);
            println!("═══════════════════════════════════════════════");
            println!();
            println!("Components:");
            for b in &totals.components {
                println!(
                    "  {:<18} {:>9.2} kg {:>12.2}",
                    b.component_name, b.real_mass_kg, b.total_cost
                );
            }
            println!();
            println!("Totals:");
            println!("  Mass:                {:>10.1} kg", totals.total_mass_kg);
            println!("  Material:            {:>10.2}", totals.total_material_cost);
            println!("  Labour:              {:>10.2}", totals.total_labour_cost);
            println!("  Components subtotal: {:>10.2}", totals.components_subtotal);
            if let Some(price) = totals.motor_price {
                println!("  Motor:               {:>10.2}", price);
            }
            if !request.buyout_items.is_empty() {
                println!("  Buyouts:             {:>10.2}", totals.buyout_subtotal);
            }
            println!("  Markup:              {:>9.1}%", totals.markup_applied * 100.0);
            println!();
            println!("═══════════════════════════════════════════════");
            println!("  GRAND TOTAL: {:.2}", totals.grand_total);
            println!("═══════════════════════════════════════════════");

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&totals) {
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
