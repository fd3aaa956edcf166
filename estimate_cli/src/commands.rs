//! Subcommand handlers
//!
//! Every command builds the session project from the plan inputs, then reads
//! one snapshot of it for output.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use estimate_core::catalog::Catalog;
use estimate_core::currency::CurrencyStyle;
use estimate_core::pdf::render_estimate_pdf;
use estimate_core::project::{ProjectData, GROUND_FLOOR_ID};
use estimate_core::{session, EstimatorSettings};
use serde_json::json;
use tracing::{debug, info};

use crate::args::{PlanArgs, RoomSpec};

/// Load settings from `--config`, or the built-in defaults
pub fn load_settings(config: Option<&Path>) -> Result<EstimatorSettings> {
    match config {
        Some(path) => {
            let settings = EstimatorSettings::load(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?;
            debug!(path = %path.display(), "settings loaded");
            Ok(settings)
        }
        None => Ok(EstimatorSettings::default()),
    }
}

/// Build the session project from a plan file, `--room` flags and terms.
///
/// Without `--plan` the project starts empty from the settings; with one,
/// terms the plan leaves out come from the settings. A `--config` catalog
/// replaces the plan's catalog. Materials are always re-derived from
/// the final room list.
pub fn build_project(plan: &PlanArgs, settings: &EstimatorSettings, config_given: bool) -> Result<Arc<ProjectData>> {
    let base = match &plan.plan {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("Failed to read plan {}", path.display()))?;
            let mut project = ProjectData::from_json_str_with(&text, settings)
                .with_context(|| format!("Invalid plan {}", path.display()))?;
            if config_given {
                project.catalog = settings.catalog.clone();
            }
            project
        }
        None => ProjectData::with_settings(settings),
    };
    session::replace(base);

    for spec in &plan.room {
        add_room(spec)?;
    }

    session::update(|project| {
        if let Some(tax) = plan.tax {
            project.set_tax(tax)?;
        }
        if let Some(discount) = plan.discount {
            project.set_discount(discount)?;
        }
        project.refresh_material_estimates();
        if plan.with_labor {
            project.populate_default_labor();
        }
        Ok(())
    })
    .context("Invalid estimate terms")?;

    Ok(session::snapshot())
}

fn add_room(spec: &RoomSpec) -> Result<()> {
    let floor_id = spec.floor_id.as_deref().unwrap_or(GROUND_FLOOR_ID);
    let id = session::update(|project| {
        let mut room = project.new_room(spec.room_type, floor_id);
        room.width_m = spec.width_m;
        room.length_m = spec.length_m;
        project.add_room(room)
    })
    .with_context(|| {
        format!(
            "Cannot add {} room {}x{} on {}",
            spec.room_type.key(),
            spec.width_m,
            spec.length_m,
            floor_id
        )
    })?;
    debug!(room_id = %id, "room added from command line");
    Ok(())
}

/// `estimate`: print the summary as text or JSON
pub fn run_estimate(plan: &PlanArgs, settings: &EstimatorSettings, config_given: bool, as_json: bool) -> Result<()> {
    let project = build_project(plan, settings, config_given)?;
    if as_json {
        let out = estimate_json(&project);
        println!("{}", serde_json::to_string_pretty(&out).context("Failed to serialize estimate")?);
    } else {
        print!("{}", estimate_text(&project, &settings.currency));
    }
    Ok(())
}

/// `invoice`: render the estimate document to `out`
pub fn run_invoice(plan: &PlanArgs, settings: &EstimatorSettings, config_given: bool, out: &Path) -> Result<()> {
    let project = build_project(plan, settings, config_given)?;
    let pdf = render_estimate_pdf(&project, &settings.currency).context("Failed to render estimate PDF")?;
    fs::write(out, &pdf).with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), bytes = pdf.len(), "estimate written");
    println!("Wrote {}", out.display());
    Ok(())
}

/// `catalog`: print the active rate catalog
pub fn run_catalog(settings: &EstimatorSettings, as_json: bool) -> Result<()> {
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&settings.catalog).context("Failed to serialize catalog")?
        );
    } else {
        print!("{}", catalog_text(&settings.catalog, &settings.currency));
    }
    Ok(())
}

fn estimate_json(project: &ProjectData) -> serde_json::Value {
    json!({
        "total_area_m2": project.total_area().value(),
        "rooms": project.rooms.len(),
        "materials": project.materials,
        "labor": project.labor,
        "tax_percent": project.tax_percent,
        "discount_percent": project.discount_percent,
        "due_date": project.due_date,
        "summary": project.cost_summary(),
    })
}

fn estimate_text(project: &ProjectData, currency: &CurrencyStyle) -> String {
    let summary = project.cost_summary();
    let mut out = String::new();

    out.push_str(&format!("Total area: {:.1}\n", project.total_area()));
    out.push_str(&format!("Rooms: {}\n", project.rooms.len()));
    out.push_str(&format!("Due date: {}\n\n", project.due_date));

    out.push_str("Materials\n");
    for m in &project.materials {
        out.push_str(&format!(
            "  {:<24} {:>8} {:<8} {:>14} {:>16}\n",
            m.name,
            m.quantity,
            m.unit,
            currency.format(m.unit_cost),
            currency.format(m.line_total())
        ));
    }

    out.push_str("\nLabor\n");
    if project.labor.is_empty() {
        out.push_str("  (none)\n");
    }
    for l in &project.labor {
        out.push_str(&format!(
            "  {:<24} {:>8} {:<8} {:>14} {:>16}\n",
            l.description,
            l.hours,
            "hrs",
            currency.format(l.rate),
            currency.format(l.line_total())
        ));
    }
    out.push('\n');

    let rows = [
        ("Materials subtotal".to_string(), currency.format(summary.materials_subtotal)),
        ("Labor subtotal".to_string(), currency.format(summary.labor_subtotal)),
        ("Subtotal".to_string(), currency.format(summary.subtotal)),
        (format!("Tax ({}%)", project.tax_percent), currency.format(summary.tax_amount)),
        (
            format!("Discount ({}%)", project.discount_percent),
            currency.format(-summary.discount_amount),
        ),
        ("Total".to_string(), currency.format(summary.total)),
    ];
    for (label, amount) in rows {
        out.push_str(&format!("{:<24} {:>16}\n", format!("{}:", label), amount));
    }
    out
}

fn catalog_text(catalog: &Catalog, currency: &CurrencyStyle) -> String {
    let mut out = String::from("Materials (per m² of floor area)\n");
    for m in &catalog.materials {
        out.push_str(&format!(
            "  {:<8} {:<24} {:>8} {:<8} {:>12}\n",
            m.id,
            m.name,
            m.per_sq_m,
            m.unit,
            currency.format(m.unit_cost)
        ));
    }

    out.push_str("\nLabor (hours per m² of floor area)\n");
    for l in &catalog.labor {
        out.push_str(&format!(
            "  {:<8} {:<24} {:>8} {:<8} {:>12}\n",
            l.id,
            l.description,
            l.hours_per_sq_m,
            "hrs",
            format!("{}/hr", currency.format(l.hourly_rate))
        ));
    }
    out
}
