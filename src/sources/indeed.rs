use std::time::Duration;

use super::adapter::{SearchUrlRule, SelectorSet, SourceProfile, SpaceEncoding};
use super::builder::ViewJobRule;
use super::fetch::RequestProfile;

pub const NAME: &str = "Indeed";
pub const ORIGIN: &str = "https://www.indeed.com";

const SELECTORS: SelectorSet = SelectorSet {
    containers: &["div.job_seen_beacon", "div.jobsearch-ResultsList div.result"],
    title: &["h2.jobTitle", "h2.title", "a.jobtitle"],
    company: &["span.companyName", "span.company", "div.company"],
    location: &["div.companyLocation", "span.location"],
    description: &["div.job-snippet", "span.summary"],
    link: &["a.jcs-JobTitle", "a.jobtitle"],
};

pub fn profile() -> SourceProfile {
    SourceProfile {
        name: NAME,
        origin: ORIGIN.to_string(),
        search: SearchUrlRule {
            path: "/jobs?",
            keyword_param: "q",
            location_param: "l",
            spaces: SpaceEncoding::Plus,
        },
        selectors: SELECTORS,
        view_job: Some(ViewJobRule {
            attribute: "data-jk",
            path: "/viewjob?jk=",
        }),
        request: RequestProfile {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            accept: Some(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                    .to_string(),
            ),
            referer: None,
            timeout: Duration::from_secs(10),
            follow_redirects: true,
        },
    }
}
