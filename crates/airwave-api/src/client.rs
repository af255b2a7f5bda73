// AirWave XML API client
//
// Wraps `reqwest::Client` with AirWave URL construction and the
// form-style session login. Endpoints return the raw response body
// (XML, or XHTML for the report pages). The access point endpoints also
// come in a parsed flavour returning `ApList` / `GraphRecord`.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::graph::GraphUrlBuilder;
use crate::model::{ApList, GraphRecord};
use crate::transport::TransportConfig;

/// Length of the response body preview carried in API errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for an AirWave management server.
///
/// Authentication is a cookie session established by [`login`](Self::login);
/// the session cookie lives in the client's jar and rides along on every
/// later request, including fetches of graph URLs built by
/// [`graph_builder`](Self::graph_builder).
pub struct AirWaveClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AirWaveClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config has none, since the session
    /// login depends on it.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client, e.g. for fetching graph images.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// A graph URL builder pointed at this server.
    pub fn graph_builder(&self) -> GraphUrlBuilder {
        GraphUrlBuilder::from_url(self.base_url.clone())
    }

    /// Build `{base}/{path}`.
    pub fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log in with username/password.
    ///
    /// `POST /LOGIN` with the credentials as query parameters. The server
    /// answers with a session cookie that the jar keeps for later calls.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let mut url = self.api_url("LOGIN")?;
        url.query_pairs_mut()
            .append_pair("credential_0", username)
            .append_pair("credential_1", password.expose_secret())
            .append_pair("destination", "/")
            .append_pair("login", "Log In")
            .append_pair("next_action", "");

        debug!("logging in at {}", url.path());

        let resp = self.http.post(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {}", preview(&body)),
            });
        }

        debug!("login successful");
        Ok(())
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /ap_list.xml`, optionally restricted to the given ids.
    pub async fn ap_list(&self, ap_ids: &[u64]) -> Result<String, Error> {
        let mut url = self.api_url("ap_list.xml")?;
        if !ap_ids.is_empty() {
            let mut query = url.query_pairs_mut();
            for id in ap_ids {
                query.append_pair("id", &id.to_string());
            }
        }
        debug!(count = ap_ids.len(), "listing access points");
        self.get(url).await
    }

    /// `GET /ap_detail.xml?id={ap_id}`
    pub async fn ap_detail(&self, ap_id: u64) -> Result<String, Error> {
        let mut url = self.api_url("ap_detail.xml")?;
        url.query_pairs_mut().append_pair("id", &ap_id.to_string());
        self.get(url).await
    }

    /// [`ap_list`](Self::ap_list), parsed.
    pub async fn access_points(&self, ap_ids: &[u64]) -> Result<ApList, Error> {
        let body = self.ap_list(ap_ids).await?;
        ApList::from_xml(&body)
    }

    /// [`ap_detail`](Self::ap_detail), parsed into the access point record.
    pub async fn access_point(&self, ap_id: u64) -> Result<GraphRecord, Error> {
        let body = self.ap_detail(ap_id).await?;
        GraphRecord::from_ap_detail_xml(&body)
    }

    /// `GET /client_detail.xml?mac={mac}`
    pub async fn client_detail(&self, mac: &str) -> Result<String, Error> {
        let mut url = self.api_url("client_detail.xml")?;
        url.query_pairs_mut().append_pair("mac", mac);
        self.get(url).await
    }

    /// `GET /rogue_detail.xml?id={ap_id}`
    pub async fn rogue_detail(&self, ap_id: u64) -> Result<String, Error> {
        let mut url = self.api_url("rogue_detail.xml")?;
        url.query_pairs_mut().append_pair("id", &ap_id.to_string());
        self.get(url).await
    }

    /// `GET /nf/reports_list?format=xml`, optionally filtered by title.
    ///
    /// The body is XHTML rather than XML.
    pub async fn report_list(&self, title: Option<&str>) -> Result<String, Error> {
        let mut url = self.api_url("nf/reports_list")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "xml");
            if let Some(title) = title {
                query.append_pair("reports_search_title", title);
            }
        }
        self.get(url).await
    }

    /// `GET /nf/report_detail?format=xml&id={report_id}`
    ///
    /// The body is XHTML rather than XML.
    pub async fn report_detail(&self, report_id: u64) -> Result<String, Error> {
        let mut url = self.api_url("nf/report_detail")?;
        url.query_pairs_mut()
            .append_pair("format", "xml")
            .append_pair("id", &report_id.to_string());
        self.get(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        Ok(resp.text().await?)
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
