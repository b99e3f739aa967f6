//! Offline region catalog commands.

use storefront_core::RegionCatalog;

pub(crate) fn run_regions(catalog: &RegionCatalog, query: Option<&str>) {
    let regions = catalog.search_regions(query.unwrap_or_default());
    if regions.is_empty() {
        println!("no regions match");
        return;
    }
    for region in regions {
        let count = catalog.list_sub_regions(region.as_str()).len();
        println!("{:<20}{count} sub-regions", region.as_str());
    }
}

/// Prints the sub-regions of `region` that match `query`.
///
/// # Errors
///
/// Returns an error if `region` is not in the catalog.
pub(crate) fn run_sub_regions(
    catalog: &RegionCatalog,
    region: &str,
    query: Option<&str>,
) -> anyhow::Result<()> {
    let region = catalog
        .region(region)
        .ok_or_else(|| anyhow::anyhow!("unknown region '{region}'"))?;

    let sub_regions = catalog.search_sub_regions(region.as_str(), query.unwrap_or_default());
    if sub_regions.is_empty() {
        println!("no sub-regions of {region} match");
        return Ok(());
    }
    for sub_region in sub_regions {
        println!("{sub_region}");
    }
    Ok(())
}
