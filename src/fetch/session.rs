// src/fetch/session.rs
// =============================================================================
// One logged-in HTTP session that downloads profile pages.
//
// How it works:
// 1. connect() builds a reqwest client with a cookie store
// 2. It loads the login page, copies the form's hidden fields (CSRF tokens and
//    the like) and posts them back with the username and password
// 3. The session cookie now rides along on every profile request
//
// If any of that fails, the whole crawl is off: connect() returns a
// SessionError and nothing gets fetched.
//
// Politeness:
// - Waits request_delay between page fetches
// - Never fetches two pages at once (PageFetcher takes &mut self)
// =============================================================================

use super::page::parse_profile_page;
use super::{ExpansionRequest, FetchedPage, PageFetcher};
use crate::config::SessionConfig;
use crate::error::{FetchError, SessionError};
use crate::profile::profile_url;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub struct ProfileSession {
    client: Client,
    base_url: Url,
    request_delay: Duration,
    pages_fetched: usize,
}

impl ProfileSession {
    /// Logs in with the configured credentials
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        let password = config.password()?;
        Self::login(config, &password).await
    }

    async fn login(config: &SessionConfig, password: &str) -> Result<Self, SessionError> {
        let base_url = config.base()?;
        let login_url = config.login_url()?;

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        info!("Loading login page {}", login_url);
        let login_page = client.get(login_url.clone()).send().await?;
        if !login_page.status().is_success() {
            return Err(SessionError::LoginRejected(login_page.status().as_u16()));
        }
        let html = login_page.text().await?;

        let form = LoginForm::parse(&html, &login_url)
            .ok_or_else(|| SessionError::LoginFormMissing(login_url.to_string()))?;

        let mut fields = form.hidden_fields;
        fields.push(("session_key".to_string(), config.username.clone()));
        fields.push(("session_password".to_string(), password.to_string()));

        debug!("Submitting login form to {}", form.action);
        let response = client.post(form.action).form(&fields).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::LoginRejected(status.as_u16()));
        }

        // A rejected login usually comes back as the login form again
        let landing_url = response.url().clone();
        let landing = response.text().await?;
        if LoginForm::parse(&landing, &landing_url).is_some() {
            return Err(SessionError::LoginRejected(status.as_u16()));
        }

        info!("Logged in as {}", config.username);
        Ok(Self {
            client,
            base_url,
            request_delay: config.request_delay(),
            pages_fetched: 0,
        })
    }
}

impl PageFetcher for ProfileSession {
    async fn fetch(
        &mut self,
        id: &str,
        expansion: Option<ExpansionRequest<'_>>,
    ) -> Result<FetchedPage, FetchError> {
        if self.pages_fetched > 0 {
            tokio::time::sleep(self.request_delay).await;
        }
        self.pages_fetched += 1;

        let url = profile_url(self.base_url.as_str(), id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let html = response.text().await?;
        Ok(parse_profile_page(&html, id, expansion))
    }
}

// The parts of a login form we need to submit it
struct LoginForm {
    action: Url,
    hidden_fields: Vec<(String, String)>,
}

impl LoginForm {
    // Finds the form that holds the password field
    fn parse(html: &str, page_url: &Url) -> Option<Self> {
        let document = Html::parse_document(html);
        let form_selector = Selector::parse("form").unwrap();
        let password_selector = Selector::parse(r#"input[name="session_password"]"#).unwrap();
        let hidden_selector = Selector::parse(r#"input[type="hidden"]"#).unwrap();

        let form = document
            .select(&form_selector)
            .find(|form| form.select(&password_selector).next().is_some())?;

        // No action attribute means "post back to this page"
        let action = match form.value().attr("action") {
            Some(action) => page_url.join(action).ok()?,
            None => page_url.clone(),
        };

        let hidden_fields = form
            .select(&hidden_selector)
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = input.value().attr("value").unwrap_or("");
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Some(Self { action, hidden_fields })
    }
}
