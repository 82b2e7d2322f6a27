//! Region catalog for the case-count monitoring service.
//!
//! Defines the canonical list of regions and their provinces, exactly as the
//! statistics site spells them. This is the single source of truth for
//! location names — all other modules should reference entries from here
//! rather than hardcoding names.
//!
//! The catalog is static, ordered, and never mutated: regions in registry
//! order, provinces in lexicographic order. The whole-country entry comes
//! first and carries a single empty placeholder province so a `Selection`
//! always has both fields.

use crate::model::Selection;

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// Name of the whole-country pseudo-region.
pub const WHOLE_COUNTRY: &str = "Italia";

/// Region that uses the autonomous-province URL form (see `ingest::source`).
pub const AUTONOMOUS_PROVINCE_REGION: &str = "Trentino Alto Adige";

/// Default selection shown on first run, before any session file exists.
pub const DEFAULT_REGION: &str = "Lombardia";
pub const DEFAULT_PROVINCE: &str = "Bergamo";

/// A region and its provinces, as spelled by the statistics site.
pub struct Region {
    pub name: &'static str,
    /// Lexicographically ordered, except the whole-country placeholder.
    pub provinces: &'static [&'static str],
}

/// Every region served by the statistics site. Names are case-sensitive as
/// sourced; lookups over the catalog are case-insensitive.
pub static REGION_REGISTRY: &[Region] = &[
    Region { name: WHOLE_COUNTRY, provinces: &[""] },
    Region {
        name: "Abruzzo",
        provinces: &["Chieti", "L'Aquila", "Pescara", "Teramo"],
    },
    Region {
        name: "Basilicata",
        provinces: &["Matera", "Potenza"],
    },
    Region {
        name: "Calabria",
        provinces: &[
            "Catanzaro",
            "Cosenza",
            "Crotone",
            "Reggio Calabria",
            "Vibo Valentia Marina",
        ],
    },
    Region {
        name: "Campania",
        provinces: &["Avellino", "Benevento", "Caserta", "Napoli", "Salerno"],
    },
    Region {
        name: "Emilia Romagna",
        provinces: &[
            "Bologna",
            "Ferrara",
            "Forlì Cesena",
            "Modena",
            "Parma",
            "Piacenza",
            "Ravenna",
            "Reggio Emilia",
            "Rimini",
        ],
    },
    Region {
        name: "Friuli Venezia Giulia",
        provinces: &["Gorizia", "Pordenone", "Trieste", "Udine"],
    },
    Region {
        name: "Lazio",
        provinces: &["Frosinone", "Latina", "Rieti", "Roma", "Viterbo"],
    },
    Region {
        name: "Liguria",
        provinces: &["Genova", "Imperia", "La Spezia", "Savona"],
    },
    Region {
        name: "Lombardia",
        provinces: &[
            "Bergamo",
            "Brescia",
            "Como",
            "Cremona",
            "Lecco",
            "Lodi",
            "Mantova",
            "Milano",
            "Monza Brianza",
            "Pavia",
            "Sondrio",
            "Varese",
        ],
    },
    Region {
        name: "Marche",
        provinces: &["Ancona", "Ascoli Piceno", "Fermo", "Macerata", "Pesaro Urbino"],
    },
    Region {
        name: "Molise",
        provinces: &["Campobasso", "Isernia"],
    },
    Region {
        name: "Piemonte",
        provinces: &[
            "Alessandria",
            "Asti",
            "Biella",
            "Cuneo",
            "Novara",
            "Torino",
            "Verbania",
            "Vercelli",
        ],
    },
    Region {
        name: "Valle d'Aosta",
        provinces: &["Aosta"],
    },
    Region {
        name: "Puglia",
        provinces: &[
            "Bari",
            "Barletta-Andria-Trani",
            "Brindisi",
            "Foggia",
            "Lecce",
            "Taranto",
        ],
    },
    Region {
        name: "Sardegna",
        provinces: &[
            "Cagliari",
            "Carbonia Iglesias",
            "Medio Campidano",
            "Nuoro",
            "Ogliastra",
            "Olbia Tempio",
            "Oristano",
            "Sassari",
        ],
    },
    Region {
        name: "Sicilia",
        provinces: &[
            "Agrigento",
            "Caltanissetta",
            "Catania",
            "Enna",
            "Messina",
            "Palermo",
            "Ragusa",
            "Siracusa",
            "Trapani",
        ],
    },
    Region {
        name: "Toscana",
        provinces: &[
            "Arezzo",
            "Firenze",
            "Grosseto",
            "Livorno",
            "Lucca",
            "Massa Carrara",
            "Pisa",
            "Pistoia",
            "Prato",
            "Siena",
        ],
    },
    Region {
        name: AUTONOMOUS_PROVINCE_REGION,
        provinces: &["Bolzano", "Trento"],
    },
    Region {
        name: "Umbria",
        provinces: &["Perugia", "Terni"],
    },
    Region {
        name: "Veneto",
        provinces: &[
            "Belluno",
            "Padova",
            "Rovigo",
            "Treviso",
            "Venezia",
            "Verona",
            "Vicenza",
        ],
    },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// All region names, in catalog order.
pub fn region_names() -> Vec<&'static str> {
    REGION_REGISTRY.iter().map(|r| r.name).collect()
}

/// Ordered provinces of a region, or `None` if the region is unknown.
/// The region name is matched case-insensitively.
pub fn provinces_of(region: &str) -> Option<&'static [&'static str]> {
    REGION_REGISTRY
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(region))
        .map(|r| r.provinces)
}

/// True for the whole-country pseudo-region.
pub fn is_whole_country(region: &str) -> bool {
    region.eq_ignore_ascii_case(WHOLE_COUNTRY)
}

/// Case-insensitive exact match over the full catalog, first match wins.
///
/// A region name resolves to that region with its first province; a province
/// name resolves to its owning region. Catalog entries have no duplicate
/// names across regions, so the first-match rule is effectively
/// deterministic.
pub fn find_by_name(name: &str) -> Option<(&'static str, &'static str)> {
    for region in REGION_REGISTRY {
        if region.name.eq_ignore_ascii_case(name) {
            return Some((region.name, region.provinces[0]));
        }
        for province in region.provinces {
            if province.eq_ignore_ascii_case(name) {
                return Some((region.name, province));
            }
        }
    }
    None
}

/// Checks that a selection's province belongs to its region. The empty
/// placeholder is valid only for the whole-country pseudo-region.
pub fn validate_selection(selection: &Selection) -> bool {
    match provinces_of(&selection.region) {
        Some(provinces) => provinces
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&selection.province)),
        None => false,
    }
}

/// The documented default selection.
pub fn default_selection() -> Selection {
    Selection::new(DEFAULT_REGION, DEFAULT_PROVINCE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_country_comes_first_with_placeholder() {
        assert_eq!(REGION_REGISTRY[0].name, WHOLE_COUNTRY);
        assert_eq!(REGION_REGISTRY[0].provinces, &[""]);
    }

    #[test]
    fn test_provinces_are_lexicographically_ordered() {
        // The catalog stores provinces pre-sorted; a violation here would
        // silently reorder the presentation layer's choice lists.
        for region in REGION_REGISTRY.iter().skip(1) {
            let mut sorted = region.provinces.to_vec();
            sorted.sort_unstable();
            assert_eq!(
                region.provinces, &sorted[..],
                "provinces of '{}' are not sorted",
                region.name
            );
        }
    }

    #[test]
    fn test_no_duplicate_names_across_catalog() {
        let mut seen = std::collections::HashSet::new();
        for region in REGION_REGISTRY {
            assert!(seen.insert(region.name), "duplicate region '{}'", region.name);
            for province in region.provinces {
                if !province.is_empty() {
                    assert!(seen.insert(province), "duplicate province '{}'", province);
                }
            }
        }
    }

    #[test]
    fn test_registry_contains_twenty_regions_plus_country() {
        assert_eq!(REGION_REGISTRY.len(), 21);
        assert_eq!(region_names().len(), 21);
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        // Both spellings must resolve to the same pair.
        let lower = find_by_name("bergamo").expect("bergamo should resolve");
        let upper = find_by_name("Bergamo").expect("Bergamo should resolve");
        assert_eq!(lower, upper);
        assert_eq!(lower, ("Lombardia", "Bergamo"));
    }

    #[test]
    fn test_find_by_name_resolves_region_to_first_province() {
        assert_eq!(find_by_name("abruzzo"), Some(("Abruzzo", "Chieti")));
        assert_eq!(find_by_name("italia"), Some((WHOLE_COUNTRY, "")));
    }

    #[test]
    fn test_find_by_name_unknown_returns_none() {
        assert_eq!(find_by_name("Atlantide"), None);
    }

    #[test]
    fn test_provinces_of_unknown_region() {
        assert!(provinces_of("Padania").is_none());
        assert_eq!(provinces_of("lombardia").map(|p| p.len()), Some(12));
    }

    #[test]
    fn test_validate_selection() {
        assert!(validate_selection(&Selection::new("Lombardia", "Bergamo")));
        assert!(validate_selection(&Selection::new("Italia", "")));
        // Province belongs to a different region.
        assert!(!validate_selection(&Selection::new("Lazio", "Bergamo")));
        // Empty placeholder is only valid for the whole country.
        assert!(!validate_selection(&Selection::new("Lombardia", "")));
        assert!(!validate_selection(&Selection::new("Padania", "Bergamo")));
    }

    #[test]
    fn test_default_selection_is_valid() {
        assert!(validate_selection(&default_selection()));
    }
}
