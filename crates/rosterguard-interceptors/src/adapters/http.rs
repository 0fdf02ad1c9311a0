use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::InterceptorChain;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::Response;
use futures::future::BoxFuture;
use http::header::{HeaderName, CONTENT_TYPE};
use std::net::SocketAddr;
use std::str::FromStr;

const MAX_BODY_BYTES: usize = 1_048_576;

pub struct AxumReq<'a> {
    pub req: &'a mut Request<Body>,
    pub cached_json: Option<serde_json::Value>,
}

pub struct AxumRes {
    pub headers: HeaderMap,
    pub status: StatusCode,
    pub body: Option<serde_json::Value>,
}

impl Default for AxumRes {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            status: StatusCode::OK,
            body: None,
        }
    }
}

impl AxumRes {
    pub fn into_response(self) -> Response {
        let has_body = self.body.is_some();
        let bytes = self
            .body
            .map(|body| serde_json::to_vec(&body).unwrap_or_default())
            .unwrap_or_default();
        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        if has_body {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        response
    }
}

#[async_trait]
impl ProtoRequest for AxumReq<'_> {
    fn method(&self) -> &str {
        self.req.method().as_str()
    }

    fn path(&self) -> &str {
        self.req.uri().path()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.req
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    fn peer_addr(&self) -> Option<String> {
        self.req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
    }

    async fn read_json(&mut self) -> Result<serde_json::Value, InterceptError> {
        if let Some(value) = self.cached_json.clone() {
            return Ok(value);
        }

        let body = std::mem::take(self.req.body_mut());
        let bytes = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| InterceptError::internal(&format!("read body: {e}")))?;
        if bytes.is_empty() {
            return Ok(serde_json::json!({}));
        }
        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| InterceptError::schema(&format!("json parse: {e}")))?;
        *self.req.body_mut() = Body::from(bytes);
        self.cached_json = Some(value.clone());
        Ok(value)
    }
}

#[async_trait]
impl ProtoResponse for AxumRes {
    fn set_status(&mut self, code: u16) {
        self.status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    }

    fn insert_header(&mut self, name: &str, value: &str) {
        if let (Ok(header_name), Ok(header_value)) = (HeaderName::from_str(name), value.parse()) {
            self.headers.insert(header_name, header_value);
        }
    }

    async fn write_json(&mut self, body: &serde_json::Value) -> Result<(), InterceptError> {
        self.body = Some(body.clone());
        Ok(())
    }
}

/// Runs `chain` around `handler` for one axum request. Rejections are
/// already written by the chain; the status is pinned to the error's so a
/// failed write still renders as a failure.
pub async fn handle_with_chain<F>(
    mut req: Request<Body>,
    chain: &InterceptorChain,
    handler: F,
) -> Response
where
    F: for<'a> FnOnce(
            &'a mut InterceptContext,
            &'a mut dyn ProtoRequest,
        ) -> BoxFuture<'a, Result<serde_json::Value, InterceptError>>
        + Send,
{
    let mut preq = AxumReq {
        req: &mut req,
        cached_json: None,
    };
    let mut pres = AxumRes::default();

    if let Err(err) = chain
        .run_with_handler(InterceptContext::default(), &mut preq, &mut pres, handler)
        .await
    {
        pres.status = rosterguard_errors::mapping_http::status_of(&err.0);
    }
    pres.into_response()
}
