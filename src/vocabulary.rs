// Fixed vocabularies for the catalog's enum-valued facets.
// Anything a client sends for these facets is checked against these lists
// before it can reach the store.

use serde::{Deserialize, Serialize};
use std::fmt;

// Shared behaviour of every registry-backed facet value.
pub trait Vocabulary: Sized + Copy + 'static {
    // Every valid value, in display order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    // Case-insensitive lookup that returns the canonical spelling.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|value| value.as_str().eq_ignore_ascii_case(raw))
    }
}

macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $label)] $variant),+
        }

        impl Vocabulary for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    // Fuel a car runs on.
    FuelType {
        Petrol => "Petrol",
        Diesel => "Diesel",
        Cng => "CNG",
        Lpg => "LPG",
        Electric => "Electric",
        Hybrid => "Hybrid",
    }
);

vocabulary!(
    Transmission {
        Manual => "Manual",
        Automatic => "Automatic",
    }
);

vocabulary!(
    // Body style, used for the sidebar's body type facet.
    BodyType {
        Hatchback => "Hatchback",
        Sedan => "Sedan",
        Suv => "SUV",
        Muv => "MUV",
        Coupe => "Coupe",
        Convertible => "Convertible",
        Pickup => "Pickup",
        Van => "Van",
        Wagon => "Wagon",
    }
);

vocabulary!(
    // Fields a listing may be sorted on. Nothing outside this list ever
    // reaches the store as a sort key.
    SortField {
        Price => "price",
        Year => "year",
        KmsDriven => "kmsDriven",
        CreatedAt => "createdAt",
    }
);

vocabulary!(
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_canonical() {
        assert_eq!(FuelType::parse("petrol"), Some(FuelType::Petrol));
        assert_eq!(FuelType::parse(" cng "), Some(FuelType::Cng));
        assert_eq!(BodyType::parse("suv").map(|b| b.as_str()), Some("SUV"));
        assert_eq!(SortField::parse("KMSDRIVEN"), Some(SortField::KmsDriven));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(FuelType::parse("Unobtainium"), None);
        assert_eq!(Transmission::parse(""), None);
        assert_eq!(SortField::parse("name"), None);
    }

    #[test]
    fn serde_uses_registry_spelling() {
        let json = serde_json::to_string(&BodyType::Suv).unwrap();
        assert_eq!(json, "\"SUV\"");
        let fuel: FuelType = serde_json::from_str("\"LPG\"").unwrap();
        assert_eq!(fuel, FuelType::Lpg);
    }
}
