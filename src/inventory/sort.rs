// Whitelisted sort resolution. Only registry fields reach the store.

use serde_json::{Value, json};

use crate::vocabulary::{SortField, SortOrder, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    pub const NEWEST: SortSpec = SortSpec {
        field: SortField::CreatedAt,
        order: SortOrder::Desc,
    };

    // Resolves a client sort key and direction. Unknown or missing keys
    // fall back to newest first; unknown directions fall back to desc.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let Some(field) = sort_by.and_then(SortField::parse) else {
            return Self::NEWEST;
        };
        let order = sort_order
            .and_then(SortOrder::parse)
            .unwrap_or(SortOrder::Desc);
        SortSpec { field, order }
    }

    // Public listing sort keys: `newest`, `price_asc`, `kms_asc`.
    pub fn resolve_public(sort: Option<&str>) -> Self {
        match sort.map(str::trim) {
            Some("price_asc") => SortSpec {
                field: SortField::Price,
                order: SortOrder::Asc,
            },
            Some("kms_asc") => SortSpec {
                field: SortField::KmsDriven,
                order: SortOrder::Asc,
            },
            _ => Self::NEWEST,
        }
    }

    // e.g. { "price": 1 }
    pub fn to_document(&self) -> Value {
        let direction = match self.order {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        };
        json!({ self.field.as_str(): direction })
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::NEWEST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_and_direction_resolve() {
        let spec = SortSpec::resolve(Some("price"), Some("asc"));
        assert_eq!(spec.field, SortField::Price);
        assert_eq!(spec.order, SortOrder::Asc);
    }

    #[test]
    fn missing_direction_defaults_to_desc() {
        let spec = SortSpec::resolve(Some("year"), None);
        assert_eq!(spec, SortSpec { field: SortField::Year, order: SortOrder::Desc });
        let spec = SortSpec::resolve(Some("year"), Some("sideways"));
        assert_eq!(spec.order, SortOrder::Desc);
    }

    #[test]
    fn unknown_key_falls_back_to_newest_first() {
        for key in [Some("name"), Some("$where"), Some(""), None] {
            assert_eq!(SortSpec::resolve(key, Some("asc")), SortSpec::NEWEST);
        }
    }

    #[test]
    fn public_sort_keys() {
        assert_eq!(SortSpec::resolve_public(Some("kms_asc")).field, SortField::KmsDriven);
        assert_eq!(SortSpec::resolve_public(Some("price_asc")).order, SortOrder::Asc);
        assert_eq!(SortSpec::resolve_public(Some("price_desc")), SortSpec::NEWEST);
        assert_eq!(SortSpec::resolve_public(None), SortSpec::NEWEST);
    }

    #[test]
    fn serializes_to_native_sort_document() {
        assert_eq!(SortSpec::NEWEST.to_document(), json!({ "createdAt": -1 }));
    }
}
