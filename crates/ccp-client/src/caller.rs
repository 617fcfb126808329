use ccp_provisioner::error::format_err_chain;
use ccp_provisioner::{ApiResponse, Endpoint, EndpointCaller, Method, ProvisionerError, ResourcePath};
use serde_json::Value;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use crate::auth::{Session, TOKEN_HEADER};

/// `EndpointCaller` over a logged-in HTTP session.
pub struct HttpCaller {
    agent: Agent,
    endpoint: Endpoint,
    session: Session,
}

impl HttpCaller {
    pub fn new(agent: Agent, endpoint: Endpoint, session: Session) -> Self {
        Self {
            agent,
            endpoint,
            session,
        }
    }

    fn prepare<B>(&self, mut req: RequestBuilder<B>, query: &[(String, String)]) -> RequestBuilder<B> {
        req = req
            .header("content-type", "application/json")
            .header(TOKEN_HEADER, &self.session.token);
        if let Some(cookies) = &self.session.cookies {
            req = req.header("cookie", cookies);
        }
        for (key, value) in query {
            req = req.query(key, value);
        }
        req
    }
}

impl EndpointCaller for HttpCaller {
    fn call(
        &self,
        method: Method,
        path: &ResourcePath,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse, ProvisionerError> {
        let url = self.endpoint.url(path);
        debug!(method = %method, url = %url, "calling API");

        let payload = body.map(serde_json::to_string).transpose()?;
        let result: Result<Response<Body>, ureq::Error> = match method {
            Method::Get => self.prepare(self.agent.get(&url), query).call(),
            Method::Delete => self.prepare(self.agent.delete(&url), query).call(),
            Method::Post => send(self.prepare(self.agent.post(&url), query), payload),
            Method::Patch => send(self.prepare(self.agent.patch(&url), query), payload),
        };

        let mut response = result.map_err(|e| ProvisionerError::Connection(format_err_chain(&e)))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ProvisionerError::Connection(format_err_chain(&e)))?;

        debug!(method = %method, url = %url, status, "API responded");
        Ok(ApiResponse { status, body })
    }
}

fn send(
    req: RequestBuilder<ureq::typestate::WithBody>,
    payload: Option<String>,
) -> Result<Response<Body>, ureq::Error> {
    match payload {
        Some(json) => req.send(json),
        None => req.send_empty(),
    }
}
