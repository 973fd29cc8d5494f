//! City and specialty tagging for scraped leads.
//!
//! Both lookups are ordered case-insensitive substring scans over curated
//! tables. Order matters only where localities overlap: the first matching
//! entry wins, and overlapping entries are deliberately not deduplicated.

/// City returned when no locality in the table matches the address.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Ordered (locality, city) pairs. Matched case-insensitively against the
/// scraped address line.
const LOCALITY_TABLE: &[(&str, &str)] = &[
    ("bandra", "Mumbai"),
    ("andheri", "Mumbai"),
    ("juhu", "Mumbai"),
    ("powai", "Mumbai"),
    ("dadar", "Mumbai"),
    ("colaba", "Mumbai"),
    ("borivali", "Mumbai"),
    ("malad", "Mumbai"),
    ("mumbai", "Mumbai"),
    ("koramangala", "Bengaluru"),
    ("indiranagar", "Bengaluru"),
    ("whitefield", "Bengaluru"),
    ("jayanagar", "Bengaluru"),
    ("hsr layout", "Bengaluru"),
    ("bengaluru", "Bengaluru"),
    ("bangalore", "Bengaluru"),
    ("connaught", "Delhi"),
    ("saket", "Delhi"),
    ("dwarka", "Delhi"),
    ("karol bagh", "Delhi"),
    ("hauz khas", "Delhi"),
    ("new delhi", "Delhi"),
    ("delhi", "Delhi"),
    ("anna nagar", "Chennai"),
    ("t nagar", "Chennai"),
    ("adyar", "Chennai"),
    ("chennai", "Chennai"),
    ("banjara hills", "Hyderabad"),
    ("gachibowli", "Hyderabad"),
    ("jubilee hills", "Hyderabad"),
    ("hyderabad", "Hyderabad"),
    ("koregaon park", "Pune"),
    ("baner", "Pune"),
    ("kothrud", "Pune"),
    ("pune", "Pune"),
    ("salt lake", "Kolkata"),
    ("park street", "Kolkata"),
    ("kolkata", "Kolkata"),
];

/// Ordered (keywords, specialty) rules. A query matches a rule when it
/// contains any of the rule's keywords, case-insensitively.
const SPECIALTY_RULES: &[(&[&str], &str)] = &[
    (&["dent"], "Dentist"),
    (&["derma", "skin"], "Dermatologist"),
    (&["physio"], "Physiotherapist"),
    (&["cardio"], "Cardiologist"),
    (&["ortho"], "Orthopedist"),
    (&["pediatric", "child specialist"], "Pediatrician"),
    (&["gynec"], "Gynecologist"),
    (&["ophthal", "eye"], "Ophthalmologist"),
    (&["gym", "fitness"], "Gym"),
    (&["salon", "parlour"], "Salon"),
    (&["vet"], "Veterinarian"),
];

/// Maps a free-text address to a canonical city.
///
/// Returns the city of the first locality in the table that appears as a
/// substring of `address` (case-insensitive), or [`UNKNOWN_CITY`].
#[must_use]
pub fn detect_city(address: &str) -> String {
    let lower = address.to_lowercase();
    LOCALITY_TABLE
        .iter()
        .find(|(locality, _)| lower.contains(locality))
        .map_or_else(|| UNKNOWN_CITY.to_string(), |(_, city)| (*city).to_string())
}

/// Maps a search query to a specialty label.
///
/// First matching rule wins; `None` means no rule matched and the caller may
/// infer a specialty from other signals (e.g. the listing name).
#[must_use]
pub fn extract_specialty(query: &str) -> Option<String> {
    let lower = query.to_lowercase();
    SPECIALTY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, label)| (*label).to_string())
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
