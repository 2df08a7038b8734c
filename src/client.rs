// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Outbound HTTP client with bearer decoration.
//!
//! Every request sent through [`ApiClient`] is built first, passed through
//! [`BearerDecorator`], then executed. The decorator reads the session
//! store on each call, so a login or logout takes effect on the very next
//! request.
//!
//! The decorator never blocks a call: without a session the request goes
//! out unauthenticated and authorization is left to the route layer.

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::GateConfig;
use crate::error::ApiError;
use crate::storage::SharedSessionRepository;

/// Attaches the stored session token as a bearer credential.
#[derive(Clone)]
pub struct BearerDecorator {
    sessions: SharedSessionRepository,
}

impl BearerDecorator {
    pub fn new(sessions: SharedSessionRepository) -> Self {
        Self { sessions }
    }

    /// Set `Authorization: Bearer <token>` when a session with a token exists.
    ///
    /// Running it twice leaves the same single header in place.
    pub fn decorate(&self, request: &mut Request) {
        let Some(session) = self.sessions.snapshot() else {
            return;
        };
        if !session.has_token() {
            return;
        }

        match HeaderValue::from_str(&format!("Bearer {}", session.token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => {
                warn!(
                    identity = %session.identity,
                    "Stored token is not a valid header value, sending request unauthenticated"
                );
            }
        }
    }
}

/// HTTP client bound to the credential API base URL.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    decorator: BearerDecorator,
}

impl ApiClient {
    pub fn new(config: &GateConfig, sessions: SharedSessionRepository) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
            decorator: BearerDecorator::new(sessions),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` under the base URL. A leading `/` is ignored so that
    /// `/auth/login` and `auth/login` name the same endpoint.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::endpoint(path, e))
    }

    /// Start a request against `path`.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.request(method, self.endpoint(path)?))
    }

    /// Build, decorate and execute a request.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let mut request = builder
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        self.decorator.decorate(&mut request);

        debug!(
            method = %request.method(),
            url = %request.url(),
            authenticated = request.headers().contains_key(AUTHORIZATION),
            "Sending request"
        );

        self.http
            .execute(request)
            .await
            .map_err(|e| ApiError::Request(e.to_string()))
    }

    /// POST `body` as JSON to `path`.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let builder = self.request(Method::GET, path)?;
        self.send(builder).await
    }
}
