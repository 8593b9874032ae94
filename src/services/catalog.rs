use anyhow::Context;
use rust_decimal::Decimal;

use crate::models::{SortBy, Vendor, VendorSearch};

static DEFAULT_CATALOG: &str = include_str!("../../data/vendors.json");

/// Read-only vendor catalog backing search and the booking form.
#[derive(Debug, Clone, Default)]
pub struct VendorCatalog {
    vendors: Vec<Vendor>,
}

impl VendorCatalog {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let vendors: Vec<Vendor> = serde_json::from_str(s).context("invalid vendor catalog")?;
        for vendor in &vendors {
            anyhow::ensure!(
                vendor.min_price <= vendor.max_price,
                "vendor {} has minPrice above maxPrice",
                vendor.id
            );
        }
        Ok(Self { vendors })
    }

    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json(DEFAULT_CATALOG)
    }

    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read vendor catalog {path}"))?;
                Self::from_json(&raw)
            }
            None => Self::embedded(),
        }
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn search(&self, params: &VendorSearch) -> Vec<Vendor> {
        let query = non_empty(&params.query).map(|q| q.to_lowercase());
        let category = non_empty(&params.category).filter(|c| !c.eq_ignore_ascii_case("all"));
        let location = non_empty(&params.location).filter(|l| !l.eq_ignore_ascii_case("all"));
        let price_range = non_empty(&params.price_range).and_then(parse_price_range);
        let min_rating = non_empty(&params.min_rating).and_then(|r| r.parse::<f64>().ok());

        let mut results: Vec<Vendor> = self
            .vendors
            .iter()
            .filter(|v| match &query {
                Some(q) => {
                    v.name.to_lowercase().contains(q)
                        || v
                            .description
                            .as_deref()
                            .map(|d| d.to_lowercase().contains(q))
                            .unwrap_or(false)
                }
                None => true,
            })
            .filter(|v| category.map_or(true, |c| v.category.eq_ignore_ascii_case(c)))
            .filter(|v| {
                location.map_or(true, |l| {
                    v.location.as_deref().map(|vl| vl.contains(l)).unwrap_or(false)
                })
            })
            .filter(|v| {
                price_range.map_or(true, |(lo, hi)| {
                    let in_range = |p: Decimal| p >= lo && p <= hi;
                    in_range(v.min_price) || in_range(v.max_price)
                })
            })
            .filter(|v| min_rating.map_or(true, |r| v.rating >= r))
            .cloned()
            .collect();

        match non_empty(&params.sort_by).and_then(SortBy::parse) {
            Some(SortBy::PriceAsc) => results.sort_by(|a, b| a.min_price.cmp(&b.min_price)),
            Some(SortBy::PriceDesc) => results.sort_by(|a, b| b.min_price.cmp(&a.min_price)),
            Some(SortBy::Rating) => results.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            Some(SortBy::ReviewCount) => results.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            None => {}
        }

        results
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parses `"min-max"`; anything else means no price filter.
fn parse_price_range(s: &str) -> Option<(Decimal, Decimal)> {
    let (lo, hi) = s.split_once('-')?;
    let lo = lo.trim().parse::<Decimal>().ok()?;
    let hi = hi.trim().parse::<Decimal>().ok()?;
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VendorCatalog {
        VendorCatalog::embedded().unwrap()
    }

    fn ids(vendors: &[Vendor]) -> Vec<&str> {
        vendors.iter().map(|v| v.id.as_str()).collect()
    }

    fn search(f: impl FnOnce(&mut VendorSearch)) -> Vec<Vendor> {
        let mut params = VendorSearch::default();
        f(&mut params);
        catalog().search(&params)
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 5);
        let vendor = catalog.get("vendor1").unwrap();
        assert_eq!(vendor.service("photo-full").unwrap().price, Decimal::new(2500, 0));
    }

    #[test]
    fn test_no_filters_returns_everything_in_catalog_order() {
        let results = search(|_| {});
        assert_eq!(ids(&results), vec!["vendor1", "vendor2", "vendor3", "vendor4", "vendor5"]);
    }

    #[test]
    fn test_query_matches_name_or_description() {
        assert_eq!(ids(&search(|p| p.query = Some("LENS".into()))), vec!["vendor1"]);
        assert_eq!(ids(&search(|p| p.query = Some("bouquets".into()))), vec!["vendor2"]);
    }

    #[test]
    fn test_category_and_location() {
        assert_eq!(ids(&search(|p| p.category = Some("florist".into()))), vec!["vendor2"]);
        assert_eq!(search(|p| p.category = Some("all".into())).len(), 5);
        assert_eq!(
            ids(&search(|p| p.location = Some("Colombo".into()))),
            vec!["vendor1", "vendor4"]
        );
    }

    #[test]
    fn test_price_range_overlap_rule() {
        // vendor4 (600-1200) and vendor5 (250-900) have a bound inside 500-1000;
        // vendor1 (800-3500) too; vendor2 (300-1800) does not
        let results = search(|p| p.price_range = Some("500-1000".into()));
        assert_eq!(ids(&results), vec!["vendor1", "vendor4", "vendor5"]);
    }

    #[test]
    fn test_malformed_filters_are_ignored() {
        assert_eq!(search(|p| p.price_range = Some("cheap".into())).len(), 5);
        assert_eq!(search(|p| p.min_rating = Some("lots".into())).len(), 5);
    }

    #[test]
    fn test_min_rating_and_sorting() {
        let results = search(|p| {
            p.min_rating = Some("4.6".into());
            p.sort_by = Some("rating".into());
        });
        assert_eq!(ids(&results), vec!["vendor4", "vendor1", "vendor5"]);

        let by_price = search(|p| p.sort_by = Some("priceAsc".into()));
        assert_eq!(by_price.first().unwrap().id, "vendor5");
        let by_reviews = search(|p| p.sort_by = Some("reviewCount".into()));
        assert_eq!(by_reviews.first().unwrap().id, "vendor3");
    }

    #[test]
    fn test_rejects_inverted_price_bounds() {
        let json = r#"[{"id":"x","name":"X","category":"Venue","rating":4.0,"reviewCount":1,"minPrice":10,"maxPrice":5}]"#;
        assert!(VendorCatalog::from_json(json).is_err());
    }
}
