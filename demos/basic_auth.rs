//! Basic Auth - one authentication chain shared by two endpoints.
//!
//! This example demonstrates:
//! - Building a chain once and branching it into several endpoints
//! - Passing the authenticated user to later handlers through the context
//! - Ending a request early by not calling `next`
//! - Serving the same chains from many tasks at once
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=infuse=trace cargo run --example basic_auth
//! ```
//!
//! Expected output:
//!
//! ```text
//! /hello as bob:1234 -> 200 OK: Hello bob!
//! /goodbye as alice:5678 -> 200 OK: Goodbye alice!
//! /goodbye as intruder:guess -> 401 Unauthorized: Permission Denied
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::StatusCode;
use infuse::{context, Builder, Chain, Handler, Request, Response, ResponseRecorder};
use tracing_subscriber::{fmt, EnvFilter};

const USERS: &[(&str, &str)] = &[("bob", "1234"), ("alice", "5678")];

/// Writes `body`, logging instead of failing the handler when the transport rejects it.
fn reply(response: &mut dyn Response, body: std::fmt::Arguments<'_>) {
    if let Err(error) = response.write_fmt(body) {
        tracing::warn!(%error, "failed to write response body");
    }
}

/// Username and password from a `Basic` authorization header.
fn credentials(request: &Request) -> Option<(String, String)> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

fn basic_auth(response: &mut dyn Response, request: &Request) {
    let valid = credentials(request).filter(|(user, password)| {
        USERS
            .iter()
            .any(|(u, p)| u == user && p == password)
    });
    let Some((user, _)) = valid else {
        response.write_head(StatusCode::UNAUTHORIZED);
        reply(response, format_args!("Permission Denied"));
        return;
    };

    if !context::set(response, user) || !infuse::next(response, request) {
        response.write_head(StatusCode::INTERNAL_SERVER_ERROR);
        reply(response, format_args!("Server Error"));
    }
}

fn greeting(response: &mut dyn Response, _: &Request) {
    let user = context::get_as::<String>(response).cloned().unwrap_or_default();
    reply(response, format_args!("Hello {}!", user));
}

fn farewell(response: &mut dyn Response, _: &Request) {
    let user = context::get_as::<String>(response).cloned().unwrap_or_default();
    reply(response, format_args!("Goodbye {}!", user));
}

fn request(path: &str, user: &str, password: &str) -> Result<Request, http::Error> {
    let token = STANDARD.encode(format!("{}:{}", user, password));
    http::Request::builder()
        .uri(path)
        .header(AUTHORIZATION, format!("Basic {}", token))
        .body(Bytes::new())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let auth = Chain::new().handle_func(basic_auth);
    let hello = auth.handle_func(greeting);
    let goodbye = auth.handle_func(farewell);

    let attempts = [
        ("/hello", "bob", "1234"),
        ("/goodbye", "alice", "5678"),
        ("/goodbye", "intruder", "guess"),
    ];

    let mut tasks = Vec::new();
    for (path, user, password) in attempts {
        let endpoint = match path {
            "/hello" => hello.clone(),
            _ => goodbye.clone(),
        };
        let request = request(path, user, password)?;
        tasks.push(tokio::task::spawn_blocking(move || {
            let mut recorder = ResponseRecorder::new();
            endpoint.serve(&mut recorder, &request);
            (request.uri().path().to_string(), recorder)
        }));
    }

    for (task, (_, user, password)) in tasks.into_iter().zip(attempts) {
        let (path, recorder) = task.await?;
        println!(
            "{} as {}:{} -> {}: {}",
            path,
            user,
            password,
            recorder.status(),
            recorder.body_string()
        );
    }

    Ok(())
}
