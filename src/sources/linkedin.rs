use std::time::Duration;

use super::adapter::{SearchUrlRule, SelectorSet, SourceProfile, SpaceEncoding};
use super::fetch::RequestProfile;

pub const NAME: &str = "LinkedIn";
pub const ORIGIN: &str = "https://www.linkedin.com";

// The public search page carries no description; listings always get the
// default one.
const SELECTORS: SelectorSet = SelectorSet {
    containers: &["li.jobs-search-results__list-item", "div.base-card"],
    title: &["h3.base-search-card__title", "h3.job-search-card__title"],
    company: &["h4.base-search-card__subtitle", "a.job-search-card__subtitle-link"],
    location: &["span.job-search-card__location", "div.base-search-card__metadata"],
    description: &[],
    link: &["a.base-card__full-link", "a.job-card-container__link"],
};

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: NAME,
        origin: ORIGIN.to_string(),
        search: SearchUrlRule {
            path: "/jobs/search/?",
            keyword_param: "keywords",
            location_param: "location",
            spaces: SpaceEncoding::Percent,
        },
        selectors: SELECTORS,
        view_job: None,
        request: RequestProfile {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            accept: None,
            referer: None,
            timeout: Duration::from_secs(10),
            follow_redirects: true,
        },
    }
}
