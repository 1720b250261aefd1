use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};
use rayon::iter::{IntoParallelRefMutIterator, ParallelIterator};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::{Method, header};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::repolist::Repository;

/// Anything that can look up the star count of `owner/name`.
pub trait StarSource {
    fn stargazers(&self, owner: &str, name: &str) -> Result<u64>;
}

#[derive(Deserialize, PartialEq, Eq, Debug)]
pub struct RepoResponse {
    pub stargazers_count: u64,
}

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: &str, timeout: Duration) -> Result<Self> {
        Self::from_builder(Client::builder(), token, api_url, timeout)
    }

    fn from_builder(
        builder: ClientBuilder,
        token: &str,
        api_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = builder
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(GitHubClient {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }
}

impl StarSource for GitHubClient {
    fn stargazers(&self, owner: &str, name: &str) -> Result<u64> {
        let url = format!("{}/repos/{owner}/{name}", self.api_url);
        let resp = self
            .client
            .request(Method::GET, url)
            .header(header::AUTHORIZATION, format!("bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            // GitHub reports failures as {"message": "..."}
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            return Err(Error::Api {
                owner: owner.to_string(),
                name: name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<RepoResponse>()?.stargazers_count)
    }
}

/// Stores the star count on `repo`. On failure the count is left as it was.
pub fn set_star_count<S: StarSource + ?Sized>(source: &S, repo: &mut Repository) {
    match source.stargazers(&repo.owner, &repo.name) {
        Ok(stars) => {
            debug!(owner = %repo.owner, name = %repo.name, stars, "got repo");
            repo.stars = stars;
        }
        Err(err) => warn!(owner = %repo.owner, name = %repo.name, "get repo err: {err}"),
    }
}

/// Fetches every repository, one at a time in parse order when `jobs` is 1.
/// A larger `jobs`, only ever set by the user, runs the fetches on a pool of
/// that many threads instead. Returns once all are done.
pub fn fetch_all<S: StarSource + Sync>(source: &S, repos: &mut [Repository], jobs: usize) {
    let pool = if jobs > 1 {
        match ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!("build fetch pool: {err}, fetching sequentially");
                None
            }
        }
    } else {
        None
    };
    fetch_on(pool.as_ref(), source, repos);
}

fn fetch_on<S: StarSource + Sync>(
    pool: Option<&ThreadPool>,
    source: &S,
    repos: &mut [Repository],
) {
    match pool {
        Some(pool) => pool.install(|| {
            repos
                .par_iter_mut()
                .for_each(|repo| set_star_count(source, repo))
        }),
        None => {
            for repo in repos.iter_mut() {
                set_star_count(source, repo);
            }
        }
    }
}
