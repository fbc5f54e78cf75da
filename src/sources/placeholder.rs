use crate::models::job::JobListing;

pub const DEFAULT_COUNT: usize = 3;

/// (prefix, suffix) around the query.
const TITLE_TEMPLATES: [(&str, &str); 3] = [
    ("Senior ", " Developer"),
    ("", " Engineer"),
    ("Junior ", " Developer"),
];

const COMPANIES: [&str; 5] = [
    "Tech Solutions Inc.",
    "Innovative Systems",
    "Digital Dynamics",
    "CloudWorks",
    "NextGen Software",
];

/// Deterministic synthetic listings standing in for a source that produced
/// nothing usable. Every listing is flagged as a placeholder.
pub fn generate(
    query: &str,
    location: &str,
    source: &str,
    search_url: &str,
    count: usize,
) -> Vec<JobListing> {
    (0..count)
        .map(|i| {
            let (prefix, suffix) = TITLE_TEMPLATES[i % TITLE_TEMPLATES.len()];
            JobListing {
                title: format!("{prefix}{query}{suffix}"),
                company: COMPANIES[i % COMPANIES.len()].to_string(),
                location: location.to_string(),
                description: format!(
                    "We are looking for a {query} to join our team. See the full posting on {source} for details."
                ),
                url: search_url.to_string(),
                source: source.to_string(),
                placeholder: true,
            }
        })
        .collect()
}
