// Brand slug -> id resolution.
//
// This is a second round trip before the main query on every brand-filtered
// request. Past a few thousand listings it is cheaper to denormalize the
// brand slug onto each car (rewritten on brand rename) and filter on it
// directly; until then the lookup keeps brands as the single source of truth.

use crate::error::StoreError;
use crate::store::BrandRepository;

// Lowercases, trims, drops blanks and duplicates.
pub fn normalize_slugs(raw: &[String]) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::with_capacity(raw.len());
    for slug in raw {
        let slug = slug.trim().to_lowercase();
        if !slug.is_empty() && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

// Ids of active brands matching `raw`. An empty result is expected and
// means "no such brand"; the caller must then match nothing rather than
// drop the filter.
pub async fn resolve_brand_ids<B: BrandRepository>(
    brands: &B,
    raw: &[String],
) -> Result<Vec<String>, StoreError> {
    let slugs = normalize_slugs(raw);
    if slugs.is_empty() {
        return Ok(Vec::new());
    }
    let ids = brands.find_active_ids_by_slugs(&slugs).await?;
    tracing::debug!(?slugs, resolved = ids.len(), "Resolved brand slugs");
    Ok(ids)
}
