//! `points` command: drives the location selector once against the API.

use std::sync::Arc;

use storefront_api::CommerceClient;
use storefront_core::RegionCatalog;
use storefront_flow::{LocationSelector, ResolveStatus};

/// Chooses `region` then `sub_region`, resolves the fulfillment points and
/// prints them, marking the auto-selected one.
///
/// # Errors
///
/// Returns an error if the region or sub-region is rejected by the catalog,
/// or if the lookup fails.
pub(crate) async fn run_points(
    client: &CommerceClient,
    catalog: RegionCatalog,
    region: &str,
    sub_region: &str,
) -> anyhow::Result<()> {
    let mut selector = LocationSelector::new(Arc::new(catalog));
    selector.choose_region(region)?;

    if let Some(request) = selector.choose_sub_region(sub_region)? {
        selector.apply_resolution(request.execute(client).await);
    }

    match &selector.point_set().status {
        ResolveStatus::Loaded(points) if points.is_empty() => {
            println!("no pickup points in {sub_region}, {region}");
        }
        ResolveStatus::Loaded(points) => {
            let selected = selector.selected_point_id();
            for point in points {
                let marker = if Some(&point.id) == selected { "*" } else { " " };
                println!(
                    "{marker} {:<12}{:<32}{}, {}",
                    point.id.as_str(),
                    point.name,
                    point.address,
                    point.city
                );
            }
        }
        ResolveStatus::Error { message, transient } => {
            let hint = if *transient { " (retry may help)" } else { "" };
            anyhow::bail!("pickup point lookup failed: {message}{hint}");
        }
        ResolveStatus::Idle | ResolveStatus::Loading => {
            anyhow::bail!("pickup point lookup did not complete");
        }
    }

    Ok(())
}
