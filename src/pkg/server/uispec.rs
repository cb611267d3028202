use askama::Template;
use lazy_static::lazy_static;
use reqwest::Url;

use crate::pkg::internal::adaptors::jobs::spec::Job;
use crate::pkg::internal::display::{
    excerpt, format_date, join_or_na, non_blank, split_lines, EXCERPT_CHARS, NOT_AVAILABLE,
};

pub const DEFAULT_DETAIL_TITLE: &str = "Applicant Dashboard";

lazy_static! {
    static ref LOCAL_ORIGIN: Url = Url::parse("http://localhost/").expect("static origin");
}

/// What one card on the list screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub href: String,
    pub title: String,
    pub org_name: String,
    pub location: String,
    pub excerpt: String,
    pub logo_url: Option<String>,
    pub categories: Vec<String>,
}

impl From<&Job> for JobCard {
    fn from(job: &Job) -> Self {
        JobCard {
            href: job_href(&job.id),
            title: job.title.clone().unwrap_or_default(),
            org_name: job.org_name.clone().unwrap_or_default(),
            location: job.location.join(", "),
            excerpt: excerpt(job.description.as_deref().unwrap_or_default(), EXCERPT_CHARS),
            logo_url: non_blank(job.logo_url.as_deref()),
            categories: job.categories.clone(),
        }
    }
}

/// Detail route for `id`, with the id percent-encoded as one path segment.
pub fn job_href(id: &str) -> String {
    let mut url = LOCAL_ORIGIN.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().extend(["jobs", id]);
    }
    url.path().to_string()
}

/// Fields of the detail screen, with fallbacks already applied where the
/// screen shows plain text. Empty lists and `None` render as placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDetail {
    pub title: String,
    pub description: Option<String>,
    pub responsibilities: Vec<String>,
    pub ideal_candidate: Option<String>,
    pub when_and_where: String,
    pub posted_on: String,
    pub deadline: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub categories: Vec<String>,
    pub required_skills: Vec<String>,
}

impl From<&Job> for JobDetail {
    fn from(job: &Job) -> Self {
        JobDetail {
            title: non_blank(job.title.as_deref())
                .unwrap_or_else(|| DEFAULT_DETAIL_TITLE.to_string()),
            description: non_blank(job.description.as_deref()),
            responsibilities: split_lines(job.responsibilities.as_deref()),
            ideal_candidate: non_blank(job.ideal_candidate.as_deref()),
            when_and_where: non_blank(job.when_and_where.as_deref())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            posted_on: format_date(job.date_posted.as_deref()),
            deadline: format_date(job.deadline.as_deref()),
            location: join_or_na(&job.location),
            start_date: format_date(job.start_date.as_deref()),
            end_date: format_date(job.end_date.as_deref()),
            categories: job.categories.clone(),
            required_skills: job.required_skills.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "jobs.html")]
pub struct JobList {
    pub cards: Vec<JobCard>,
}

#[derive(Template)]
#[template(path = "list_error.html")]
pub struct ListError {
    pub message: String,
}

#[derive(Template)]
#[template(path = "job_detail.html")]
pub struct JobDetailPage {
    pub job: JobDetail,
}

#[derive(Template)]
#[template(path = "detail_error.html")]
pub struct DetailError {
    pub message: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFound {}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct Loading {
    pub refresh_secs: u64,
}
