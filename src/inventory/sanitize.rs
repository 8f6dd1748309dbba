// Semantic repair of an already-typed filter request.
// Never rejects: anomalies are fixed in place and reported as warnings.

use super::filters::CarFilters;

pub const MIN_YEAR: i32 = 1900;

#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    pub filters: CarFilters,
    pub warnings: Vec<String>,
}

// Applies the repair rules in order: swap inverted price range, swap
// inverted year range, clamp each year into `[1900, current_year]`, floor a
// negative minimum price at zero.
pub fn sanitize(mut filters: CarFilters, current_year: i32) -> Sanitized {
    let mut warnings = Vec::new();

    if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
        if min > max {
            filters.min_price = Some(max);
            filters.max_price = Some(min);
            warnings.push(format!(
                "minPrice ({}) was greater than maxPrice ({}); values swapped",
                min, max
            ));
        }
    }

    if let (Some(min), Some(max)) = (filters.min_year, filters.max_year) {
        if min > max {
            filters.min_year = Some(max);
            filters.max_year = Some(min);
            warnings.push(format!(
                "minYear ({}) was greater than maxYear ({}); values swapped",
                min, max
            ));
        }
    }

    filters.min_year = filters.min_year.map(|y| y.clamp(MIN_YEAR, current_year));
    filters.max_year = filters.max_year.map(|y| y.clamp(MIN_YEAR, current_year));

    if let Some(min) = filters.min_price {
        if min < 0 {
            filters.min_price = Some(0);
            warnings.push(format!("minPrice ({}) cannot be negative; using 0", min));
        }
    }

    Sanitized { filters, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    fn prices(min: Option<i64>, max: Option<i64>) -> CarFilters {
        CarFilters {
            min_price: min,
            max_price: max,
            ..CarFilters::default()
        }
    }

    #[test]
    fn inverted_price_range_is_swapped_with_warning() {
        for (min, max) in [(10, 5), (900_000, 0), (1, -1)] {
            let out = sanitize(prices(Some(min), Some(max)), YEAR);
            let (lo, hi) = (out.filters.min_price.unwrap(), out.filters.max_price.unwrap());
            assert!(lo <= hi, "{lo} > {hi}");
            assert!(out.warnings.iter().any(|w| w.contains("minPrice")));
        }
    }

    #[test]
    fn ordered_price_range_passes_through_silently() {
        for (min, max) in [(0, 0), (5, 10), (0, 1_000_000)] {
            let input = prices(Some(min), Some(max));
            let out = sanitize(input.clone(), YEAR);
            assert_eq!(out.filters, input);
            assert!(out.warnings.is_empty());
        }
    }

    #[test]
    fn negative_min_price_floors_at_zero() {
        let out = sanitize(prices(Some(-500), None), YEAR);
        assert_eq!(out.filters.min_price, Some(0));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn zero_min_price_is_kept() {
        let out = sanitize(prices(Some(0), None), YEAR);
        assert_eq!(out.filters.min_price, Some(0));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn years_are_clamped_into_supported_window() {
        let cases = [
            (1850, MIN_YEAR),
            (1900, 1900),
            (2015, 2015),
            (YEAR, YEAR),
            (YEAR + 1, YEAR),
            (3000, YEAR),
        ];
        for (requested, expected) in cases {
            let filters = CarFilters {
                min_year: Some(requested),
                max_year: Some(requested),
                ..CarFilters::default()
            };
            let out = sanitize(filters, YEAR);
            assert_eq!(out.filters.min_year, Some(expected));
            assert_eq!(out.filters.max_year, Some(expected));
        }
    }

    #[test]
    fn inverted_years_are_swapped_then_clamped() {
        let filters = CarFilters {
            min_year: Some(3000),
            max_year: Some(1800),
            ..CarFilters::default()
        };
        let out = sanitize(filters, YEAR);
        assert_eq!(out.filters.min_year, Some(MIN_YEAR));
        assert_eq!(out.filters.max_year, Some(YEAR));
        assert_eq!(out.warnings.len(), 1);
    }
}
