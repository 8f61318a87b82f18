//! The closed issues and merged pull requests of a GitHub milestone.

use itertools::Itertools;
use miette::Diagnostic;
use relnotes_config::GitHub;
use relnotes_document::{ChangeKind, ChangeRecord};
use reqwest::{Client, RequestBuilder, header};
use serde::Deserialize;
use tracing::debug;

const SEARCH_URL: &str = "https://api.github.com/search/issues";
const PER_PAGE: usize = 100;

#[derive(Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    number: u64,
    title: String,
    html_url: String,
}

impl SearchItem {
    fn into_record(self, kind: ChangeKind) -> ChangeRecord {
        let title = self.title.split_whitespace().join(" ");
        ChangeRecord::new(kind, self.number, self.html_url, title)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Milestone {
    pub(crate) issues: Vec<ChangeRecord>,
    pub(crate) pull_requests: Vec<ChangeRecord>,
}

/// Fetch everything in `milestone`, sorted by number.
pub(crate) async fn milestone(
    config: &GitHub,
    milestone: &str,
    token: Option<&str>,
) -> Result<Milestone, Error> {
    let client = Client::builder()
        .user_agent(concat!("relnotes/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| Error::ApiRequest {
            err: source.to_string(),
            activity: String::from("creating an HTTP client"),
        })?;
    if token.is_none() {
        debug!("No GitHub token, searching anonymously");
    }
    let (issues, pull_requests) = tokio::try_join!(
        search(&client, config, milestone, ChangeKind::Issue, token),
        search(&client, config, milestone, ChangeKind::PullRequest, token),
    )?;
    Ok(Milestone {
        issues,
        pull_requests,
    })
}

fn query(config: &GitHub, milestone: &str, kind: ChangeKind) -> String {
    let filter = match kind {
        ChangeKind::Issue => "is:issue is:closed",
        ChangeKind::PullRequest => "is:pr is:merged",
    };
    format!(
        "repo:{owner}/{repo} milestone:\"{milestone}\" {filter}",
        owner = config.owner,
        repo = config.repo
    )
}

async fn search(
    client: &Client,
    config: &GitHub,
    milestone: &str,
    kind: ChangeKind,
    token: Option<&str>,
) -> Result<Vec<ChangeRecord>, Error> {
    let query = query(config, milestone, kind);
    let activity = format!("listing {kind}s in milestone {milestone}");
    let mut records = Vec::new();
    for page in 1_u32.. {
        debug!("Searching GitHub for {query}, page {page}");
        let response = request(client, &query, page, token)
            .send()
            .await
            .map_err(|source| Error::ApiRequest {
                err: source.to_string(),
                activity: activity.clone(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
                activity,
            });
        }
        let items = response
            .json::<SearchResponse>()
            .await
            .map_err(|source| Error::ApiResponse {
                source,
                activity: activity.clone(),
            })?
            .items;
        if !add_page(&mut records, items, kind) {
            break;
        }
    }
    let records = merge(records);
    debug!("Found {} {kind}s", records.len());
    Ok(records)
}

/// One page of search results, authenticated if there's a token.
fn request(client: &Client, query: &str, page: u32, token: Option<&str>) -> RequestBuilder {
    let request = client
        .get(SEARCH_URL)
        .header(header::ACCEPT, "application/vnd.github+json")
        .query(&[
            ("q", query),
            ("per_page", PER_PAGE.to_string().as_str()),
            ("page", page.to_string().as_str()),
        ]);
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Add a page of results to `records`. Returns whether there may be another page, which is only
/// the case after a full one.
fn add_page(records: &mut Vec<ChangeRecord>, items: Vec<SearchItem>, kind: ChangeKind) -> bool {
    let full = items.len() >= PER_PAGE;
    records.extend(items.into_iter().map(|item| item.into_record(kind)));
    full
}

/// Sort by number, dropping anything that showed up on more than one page.
fn merge(mut records: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
    records.sort_by_key(|record| record.number);
    records.dedup_by_key(|record| record.number);
    records
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub(crate) enum Error {
    #[error("Trouble communicating with GitHub while {activity}: {err}")]
    #[diagnostic(
        code(github::api_request_error),
        help("There was a problem communicating with GitHub, this may be a network issue.")
    )]
    ApiRequest { err: String, activity: String },
    #[error("GitHub responded with {status} while {activity}: {body}")]
    #[diagnostic(
        code(github::status),
        help(
            "Anonymous requests are heavily rate limited, set GITHUB_TOKEN to a token that can read the repository."
        )
    )]
    Status {
        status: u16,
        body: String,
        activity: String,
    },
    #[error("Trouble decoding the response from GitHub while {activity}: {source}")]
    #[diagnostic(
        code(github::api_response_error),
        help("Failure to decode a response from GitHub is probably a bug.")
    )]
    ApiResponse {
        source: reqwest::Error,
        activity: String,
    },
}
