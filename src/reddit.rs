//! Minimal Reddit client for the announcement platform
//!
//! Covers exactly the two operations the decision layer needs: reading the
//! newest posts in the target subreddit and submitting a self post. Uses
//! the OAuth2 password grant; the token is fetched fresh per operation
//! batch, since the bot keeps no state across cycles.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::reddit::{OAUTH_BASE_URL, TOKEN_URL};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    #[serde(default)]
    title: String,
}

/// Script-app Reddit client bound to one account.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: Client,
    token_url: String,
    oauth_base_url: String,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    user_agent: String,
}

impl RedditClient {
    pub fn new(client: Client, config: &Config) -> RedditClient {
        RedditClient {
            client,
            token_url: TOKEN_URL.to_string(),
            oauth_base_url: OAUTH_BASE_URL.to_string(),
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
            username: config.reddit_username.clone(),
            password: config.reddit_password.clone(),
            user_agent: config.reddit_user_agent.clone(),
        }
    }

    /// Points the client at alternative endpoints. Used by tests to target
    /// a mock server.
    pub fn with_base_urls(
        mut self,
        token_url: impl Into<String>,
        oauth_base_url: impl Into<String>,
    ) -> RedditClient {
        self.token_url = token_url.into();
        self.oauth_base_url = oauth_base_url.into();
        self
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(&[
                ("grant_type", "password"),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(AppError::ApiFetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::reddit_auth_error(format!(
                "token endpoint returned HTTP {status}"
            )));
        }

        let token: TokenResponse = response.json().await.map_err(AppError::ApiFetch)?;
        if let Some(error) = token.error {
            return Err(AppError::reddit_auth_error(error));
        }
        token
            .access_token
            .ok_or_else(|| AppError::reddit_auth_error("token response had no access_token"))
    }

    /// Titles of the newest `limit` posts in the subreddit, newest first.
    pub async fn recent_titles(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<String>, AppError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/r/{subreddit}/new?limit={limit}&raw_json=1",
            self.oauth_base_url
        );
        debug!("Listing newest posts from {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(AppError::ApiFetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_server_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                &url,
            ));
        }

        let listing: Listing = response.json().await.map_err(AppError::ApiFetch)?;
        Ok(listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.title)
            .collect())
    }

    /// Submits a self post and returns nothing on success. Exactly one
    /// outbound write per call.
    pub async fn submit_self_post(
        &self,
        subreddit: &str,
        title: &str,
        body: &str,
    ) -> Result<(), AppError> {
        let token = self.access_token().await?;
        let url = format!("{}/api/submit", self.oauth_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .form(&[
                ("sr", subreddit),
                ("kind", "self"),
                ("title", title),
                ("text", body),
                ("api_type", "json"),
                ("resubmit", "true"),
            ])
            .send()
            .await
            .map_err(AppError::ApiFetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::api_server_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                &url,
            ));
        }

        info!("Submitted post to r/{subreddit}: {title}");
        Ok(())
    }
}
