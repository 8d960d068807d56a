//! Address normalization and geocode candidate construction.
//!
//! Free-form input is cleaned up (whitespace, quotes, empty comma components),
//! tagged as Canadian or US by matching components against a fixed token set,
//! and expanded into a list of progressively simpler queries to try against
//! the geocoder in order.

/// Province names/codes (plus "CANADA") that mark an address as Canadian.
const CANADIAN_TOKENS: &[&str] = &[
    "ON", "BC", "AB", "MB", "NB", "NL", "NS", "NT", "NU", "PE", "QC", "SK", "YT",
    "ONTARIO", "BRITISH COLUMBIA", "ALBERTA", "MANITOBA", "NEW BRUNSWICK",
    "NEWFOUNDLAND AND LABRADOR", "NOVA SCOTIA", "NORTHWEST TERRITORIES",
    "NUNAVUT", "PRINCE EDWARD ISLAND", "QUEBEC", "SASKATCHEWAN", "YUKON",
    "CANADA",
];

/// Normalize a raw address: strip quotes, collapse whitespace runs, drop
/// empty comma components, trim. Idempotent.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| *c != '\'' && *c != '"').collect();
    stripped
        .split(',')
        .map(|comp| comp.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|comp| !comp.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a normalized address into its comma components.
pub fn components(address: &str) -> Vec<String> {
    address
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Whether any component matches a Canadian province/country token.
pub fn is_canadian(components: &[String]) -> bool {
    components
        .iter()
        .any(|c| CANADIAN_TOKENS.contains(&c.to_uppercase().as_str()))
}

/// Build the ordered list of geocode queries for an address.
///
/// The full cleaned address always comes first; simpler rewrites (without the
/// street number, city + province/state only) follow as fallbacks.
pub fn candidate_queries(address: &str) -> Vec<String> {
    let comps = components(&normalize(address));
    if comps.is_empty() {
        return Vec::new();
    }

    let queries = if is_canadian(&comps) {
        canadian_queries(comps)
    } else {
        us_queries(comps)
    };

    dedup_preserving_order(queries)
}

fn canadian_queries(comps: Vec<String>) -> Vec<String> {
    let mut comps: Vec<String> = comps
        .into_iter()
        .filter(|c| !c.to_uppercase().contains("USA"))
        .collect();
    if !comps.last().is_some_and(|c| c.contains("Canada")) {
        comps.push("Canada".to_string());
    }

    let mut queries = vec![comps.join(", ")];

    // Without the leading street number.
    if let Some(first) = comps.first() {
        let parts: Vec<&str> = first.split(' ').collect();
        if parts.len() > 1 && parts[0].chars().all(|c| c.is_ascii_digit()) {
            let mut rewritten = vec![parts[1..].join(" ")];
            rewritten.extend(comps[1..].iter().cloned());
            queries.push(rewritten.join(", "));
        }
    }

    // City and province only.
    if comps.len() >= 3 {
        let n = comps.len();
        queries.push(format!("{}, {}, Canada", comps[n - 3], comps[n - 2]));
    }

    queries
}

fn us_queries(comps: Vec<String>) -> Vec<String> {
    let mut comps: Vec<String> = comps
        .into_iter()
        .filter(|c| !c.to_uppercase().contains("CANADA"))
        .collect();
    if !comps.last().is_some_and(|c| c.to_uppercase().contains("USA")) {
        comps.push("USA".to_string());
    }

    let mut queries = vec![comps.join(", ")];

    // Street + city + state only.
    if comps.len() >= 4 {
        let n = comps.len();
        queries.push(format!("{}, {}, {}, USA", comps[0], comps[1], comps[n - 2]));
    }

    queries
}

fn dedup_preserving_order(queries: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for q in queries {
        if !seen.contains(&q) {
            seen.push(q);
        }
    }
    seen
}
