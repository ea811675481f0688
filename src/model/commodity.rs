use serde::{Deserialize, Serialize};

/// A resolved trade commodity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityData {
    pub name: String,
}

impl CommodityData {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Commodities common enough that an exact (case-insensitive) match resolves
/// without consulting the reference table.
pub const COMMON_COMMODITIES: &[&str] = &[
    "Agronomic Treatment",
    "Bauxite",
    "Bertrandite",
    "Gold",
    "Indite",
    "Silver",
    "Tritium",
    "Wine",
];

/// Reference table for fuzzy commodity lookup.
///
/// Substring matches against this list back the commodity resolver when the
/// search term is not one of the common commodities.
pub const COMMODITY_REFERENCE: &[&str] = &[
    "Agronomic Treatment",
    "Aluminium",
    "Bauxite",
    "Beer",
    "Bertrandite",
    "Biowaste",
    "Ceramic Composites",
    "Coltan",
    "Computer Components",
    "Copper",
    "Cobalt",
    "Fish",
    "Food Cartridges",
    "Gallite",
    "Gold",
    "Grain",
    "Hydrogen Fuel",
    "Indite",
    "Insulating Membrane",
    "Lepidolite",
    "Liquid Oxygen",
    "Lithium Hydroxide",
    "Medical Diagnostic Equipment",
    "Methane Clathrate",
    "Micro Controllers",
    "Osmium",
    "Palladium",
    "Platinum",
    "Power Generators",
    "Praseodymium",
    "Rutile",
    "Samarium",
    "Semiconductors",
    "Silver",
    "Superconductors",
    "Thorium",
    "Titanium",
    "Tritium",
    "Uraninite",
    "Water",
    "Water Purifiers",
    "Wine",
];

/// Looks up a commodity by exact case-insensitive name in the common list.
pub fn find_common(term: &str) -> Option<CommodityData> {
    COMMON_COMMODITIES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(term.trim()))
        .map(|name| CommodityData::new(*name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_lookup_is_case_insensitive() {
        assert_eq!(find_common("gold").unwrap().name, "Gold");
        assert_eq!(find_common("AGRONOMIC TREATMENT").unwrap().name, "Agronomic Treatment");
    }

    #[test]
    fn common_lookup_rejects_partial_names() {
        assert!(find_common("Gol").is_none());
    }

    #[test]
    fn reference_table_contains_all_common_commodities() {
        for name in COMMON_COMMODITIES {
            assert!(COMMODITY_REFERENCE.contains(name));
        }
    }
}
