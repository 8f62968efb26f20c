use super::failure::FailureBody;
use super::{Authority, RemoteError, RemoteResult};
use crate::auth::SessionContext;
use crate::errors::AppResult;
use crate::models::requests::{CheckInRequest, CheckOutRequest, StatusResponse};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_PATH: &str = "/attendance/status";
const CHECK_IN_PATH: &str = "/attendance/check-in";
const CHECK_OUT_PATH: &str = "/attendance/check-out";

/// Blocking JSON client for the attendance server.
pub struct HttpAuthority {
    client: Client,
    base_url: String,
}

impl HttpAuthority {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(req: RequestBuilder, ctx: &SessionContext) -> RequestBuilder {
        let req = req.header(CONTENT_TYPE, "application/json");
        match ctx.bearer() {
            Some(b) => req.header(AUTHORIZATION, b),
            None => req,
        }
    }

    fn send(&self, method: &str, path: &str, req: RequestBuilder) -> RemoteResult<Response> {
        let resp = req.send().map_err(|e| {
            warn!(method, path, error = %e, "request failed");
            RemoteError::Transport(e.to_string())
        })?;

        let status = resp.status();
        debug!(method, path, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Expired);
        }

        // body content is deliberately not logged
        let body = resp
            .bytes()
            .map(|b| FailureBody::from_bytes(&b))
            .unwrap_or_else(|_| FailureBody::empty());

        Err(RemoteError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn post<T: Serialize>(&self, ctx: &SessionContext, path: &str, body: &T) -> RemoteResult<()> {
        let req = Self::authorize(self.client.post(self.url(path)), ctx).json(body);
        self.send("POST", path, req)?;
        Ok(())
    }
}

impl Authority for HttpAuthority {
    fn status(&self, ctx: &SessionContext) -> RemoteResult<StatusResponse> {
        let req = Self::authorize(self.client.get(self.url(STATUS_PATH)), ctx);
        let resp = self.send("GET", STATUS_PATH, req)?;
        resp.json::<StatusResponse>()
            .map_err(|e| RemoteError::Transport(format!("invalid status body: {e}")))
    }

    fn check_in(&self, ctx: &SessionContext, req: &CheckInRequest) -> RemoteResult<()> {
        self.post(ctx, CHECK_IN_PATH, req)
    }

    fn check_out(&self, ctx: &SessionContext, req: &CheckOutRequest) -> RemoteResult<()> {
        self.post(ctx, CHECK_OUT_PATH, req)
    }
}
