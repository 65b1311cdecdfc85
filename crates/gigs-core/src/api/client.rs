//! Client for the gigs REST API.
//!
//! `GigClient` owns the bearer token returned by sign-in and a local copy of
//! the gig list. The local list only ever reflects what the server has
//! returned or acknowledged.

use chrono::{DateTime, Utc};
use reqwest::header::{self, HeaderName};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::auth::Bearer;
use crate::config::Config;
use crate::models::{Gig, User};

use super::error::{ApiError, Result};
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

// ============================================================================
// Routes
// ============================================================================

const SIGN_UP_PATH: &str = "/users/signup";
const LOGIN_PATH: &str = "/users/login";
const GIGS_PATH: &str = "/gigs";

/// Header carrying the raw token on gig creation. The service reads this
/// name (not `Authorization`) for `POST /gigs`.
const AUTHENTICATION_HEADER: &str = "authentication";

pub struct GigClient<T = HttpTransport> {
    transport: T,
    bearer: Option<Bearer>,
    gigs: Vec<Gig>,
}

impl GigClient<HttpTransport> {
    /// Create a client talking to the base URL from `config`
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.api_base_url();
        debug!(base_url = %base_url, "Creating gig client");
        let transport = HttpTransport::new(base_url, config.request_timeout())?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> GigClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            bearer: None,
            gigs: Vec::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn bearer(&self) -> Option<&Bearer> {
        self.bearer.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.bearer.is_some()
    }

    /// Gigs known locally, in the order the server returned or accepted them
    pub fn gigs(&self) -> &[Gig] {
        &self.gigs
    }

    /// Drop the bearer and the local gig list
    pub fn sign_out(&mut self) {
        self.bearer = None;
        self.gigs.clear();
    }

    // ===== Requests =====

    fn require_bearer(&self) -> Result<&Bearer> {
        self.bearer.as_ref().ok_or(ApiError::NotAuthenticated)
    }

    /// Execute a request, turning any non-success status into an error.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Request failed");
            e
        })?;

        if response.is_success() {
            debug!(method = %method, path = %path, status = %response.status, "Request succeeded");
            Ok(response)
        } else {
            warn!(method = %method, path = %path, status = %response.status, "Request rejected");
            Err(ApiError::from_status(response.status, &response.text()))
        }
    }

    fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D> {
        if response.is_empty() {
            return Err(ApiError::EmptyResponse);
        }
        serde_json::from_slice(&response.body).map_err(ApiError::Decode)
    }

    // ===== Authentication =====

    /// Register a new account. Does not sign in.
    pub async fn sign_up(&self, user: &User) -> Result<()> {
        let request = ApiRequest::post(SIGN_UP_PATH).json(user)?;
        self.send(request).await?;
        info!(username = %user.username, "Signed up");
        Ok(())
    }

    /// Sign in and keep the returned bearer for later calls.
    ///
    /// A failed sign-in leaves any previously stored bearer in place.
    pub async fn sign_in(&mut self, user: &User) -> Result<()> {
        let request = ApiRequest::post(LOGIN_PATH).json(user)?;
        let response = self.send(request).await?;

        let bearer: Bearer = Self::decode(&response)?;
        if bearer.token.trim().is_empty() {
            return Err(ApiError::InvalidResponse(
                "sign-in response contained an empty token".to_string(),
            ));
        }

        info!(username = %user.username, "Signed in");
        self.bearer = Some(bearer);
        Ok(())
    }

    // ===== Gigs =====

    /// Fetch every gig and replace the local list with the result.
    pub async fn list_gigs(&mut self) -> Result<&[Gig]> {
        let bearer = self.require_bearer()?;
        let request =
            ApiRequest::get(GIGS_PATH).header(header::AUTHORIZATION, &bearer.as_header_value())?;

        let response = self.send(request).await?;
        let gigs: Vec<Gig> = Self::decode(&response)?;

        debug!(count = gigs.len(), "Fetched gigs");
        self.gigs = gigs;
        Ok(&self.gigs)
    }

    /// Create a gig on the server, then record it locally.
    ///
    /// The gig is appended only once the server has accepted it. When the
    /// response body carries the stored gig, that copy (with its id) is kept;
    /// otherwise the gig as sent is.
    pub async fn create_gig(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Result<Gig> {
        let bearer = self.require_bearer()?;
        let gig = Gig::new(title, description, due_date);

        let request = ApiRequest::post(GIGS_PATH)
            .header(HeaderName::from_static(AUTHENTICATION_HEADER), bearer.token())?
            .json(&gig)?;

        let response = self.send(request).await?;
        let created = match Self::decode::<Gig>(&response) {
            Ok(stored) => stored,
            Err(ApiError::EmptyResponse) => gig,
            Err(e) => {
                warn!(error = %e, "Create response did not decode as a gig, keeping local copy");
                gig
            }
        };

        info!(title = %created.title, id = ?created.id, "Created gig");
        self.gigs.push(created.clone());
        Ok(created)
    }
}
