//! Executes core-built requests with ureq.
//!
//! ureq's status-as-error behavior is disabled so 4xx/5xx responses come
//! back as data and the core decides what they mean. Only failures with no
//! response at all become `ApiError::Transport`.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Outcome};
use ureq::Agent;

pub fn agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Blocking; run it off the event loop.
pub fn execute(agent: &Agent, req: HttpRequest) -> Outcome {
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent.post(&req.path).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent.patch(&req.path).content_type("application/json").send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}
