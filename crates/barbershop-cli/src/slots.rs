//! `slots` and `branches` commands.

use std::sync::Arc;

use barbershop_booking::{BookingForm, FormSettings, FormSnapshot};
use barbershop_core::{
    default_branches, load_branches, AppConfig, BookingField, BranchesFile, Clock, ShopClock,
};

fn branches_for(config: &AppConfig) -> anyhow::Result<BranchesFile> {
    if config.branches_path.exists() {
        Ok(load_branches(&config.branches_path)?)
    } else {
        tracing::debug!(
            path = %config.branches_path.display(),
            "branches file not found; using built-in branches"
        );
        Ok(default_branches())
    }
}

/// Prints every branch as `id  name  address`.
///
/// # Errors
///
/// Returns an error if the configured branches file exists but is invalid.
pub(crate) fn run_branches(config: &AppConfig) -> anyhow::Result<()> {
    let branches = branches_for(config)?;
    for branch in &branches.branches {
        println!("{:<12} {:<22} {}", branch.id, branch.name, branch.address);
    }
    Ok(())
}

/// Runs a branch and date through the booking form and prints the slots.
///
/// # Errors
///
/// Returns an error if the branch is unknown or the branches file is invalid.
pub(crate) async fn run_slots(
    config: &AppConfig,
    branch: &str,
    date: Option<&str>,
) -> anyhow::Result<()> {
    let branches = branches_for(config)?;
    let Some(found) = branches.find(branch) else {
        let known: Vec<&str> = branches.branches.iter().map(|b| b.id.as_str()).collect();
        anyhow::bail!("unknown branch '{branch}' (known: {})", known.join(", "));
    };
    let heading = format!("{} on", found.name);

    let clock = Arc::new(ShopClock::from_offset_minutes(config.utc_offset_minutes));
    let date = date.map_or_else(
        || clock.now().date().format("%Y-%m-%d").to_string(),
        str::to_string,
    );

    let mut form = BookingForm::new(
        Arc::new(branches),
        clock,
        FormSettings::from_millis(
            config.slot_lookup_delay_ms,
            config.booking_submit_delay_ms,
        ),
    );
    form.set_field(BookingField::Branch, branch).await;
    form.set_field(BookingField::Date, date.as_str()).await;
    form.wait_for_slots().await;

    println!("{heading} {date}");
    println!("{}", render_slots(&form.snapshot().await));
    Ok(())
}

pub(crate) fn render_slots(snapshot: &FormSnapshot) -> String {
    if let Some(message) = snapshot.errors.get(BookingField::Date) {
        return format!("  {message}");
    }
    snapshot
        .available_slots
        .iter()
        .map(|slot| format!("  {slot}"))
        .collect::<Vec<_>>()
        .join("\n")
}
