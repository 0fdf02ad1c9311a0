use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;

pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// Seeds the request id, client address and raw credentials.
pub struct ContextInitStage {
    pub session_cookie: String,
}

impl Default for ContextInitStage {
    fn default() -> Self {
        Self {
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

#[async_trait]
impl Stage for ContextInitStage {
    async fn handle(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<StageOutcome, InterceptError> {
        cx.request_id = req
            .header("X-Request-Id")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        cx.client_addr = client_addr(req);

        cx.credentials.bearer = req
            .header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer ").map(|t| t.trim().to_string()))
            .filter(|token| !token.is_empty());
        cx.credentials.session_cookie = req
            .header("Cookie")
            .and_then(|cookies| cookie_value(&cookies, &self.session_cookie));

        Ok(StageOutcome::Continue)
    }
}

/// Leftmost `X-Forwarded-For` entry, then `X-Real-IP`, then the transport peer.
fn client_addr(req: &dyn ProtoRequest) -> Option<String> {
    let forwarded = req.header("X-Forwarded-For").and_then(|value| {
        value
            .split(',')
            .next()
            .map(|first| first.trim().to_string())
            .filter(|first| !first.is_empty())
    });
    forwarded
        .or_else(|| {
            req.header("X-Real-IP")
                .map(|ip| ip.trim().to_string())
                .filter(|ip| !ip.is_empty())
        })
        .or_else(|| req.peer_addr())
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::cookie_value;

    #[test]
    fn picks_named_cookie() {
        let header = "theme=dark; session=abc123; other=1";
        assert_eq!(cookie_value(header, "session").as_deref(), Some("abc123"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("session=", "session"), None);
    }
}
