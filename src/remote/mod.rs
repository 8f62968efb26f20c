//! Contract with the attendance server ("remote authority").
//!
//! The state machine only talks to the `Authority` trait; `HttpAuthority`
//! is the production implementation.

pub mod failure;
pub mod http;

use crate::auth::SessionContext;
use crate::models::requests::{CheckInRequest, CheckOutRequest, StatusResponse};
use failure::FailureBody;
use thiserror::Error;

pub use http::HttpAuthority;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// 401: the credential is missing, invalid or expired.
    #[error("session expired")]
    Expired,

    /// Any other non-success status. The body is kept structured, never as text.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: FailureBody },

    /// Connection, timeout or decoding problem.
    #[error("transport failure: {0}")]
    Transport(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

pub trait Authority {
    fn status(&self, ctx: &SessionContext) -> RemoteResult<StatusResponse>;

    fn check_in(&self, ctx: &SessionContext, req: &CheckInRequest) -> RemoteResult<()>;

    fn check_out(&self, ctx: &SessionContext, req: &CheckOutRequest) -> RemoteResult<()>;
}

impl<A: Authority + ?Sized> Authority for &A {
    fn status(&self, ctx: &SessionContext) -> RemoteResult<StatusResponse> {
        (**self).status(ctx)
    }

    fn check_in(&self, ctx: &SessionContext, req: &CheckInRequest) -> RemoteResult<()> {
        (**self).check_in(ctx, req)
    }

    fn check_out(&self, ctx: &SessionContext, req: &CheckOutRequest) -> RemoteResult<()> {
        (**self).check_out(ctx, req)
    }
}
