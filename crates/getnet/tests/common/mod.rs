//! In-process mock gateway for integration tests.
//!
//! Binds an actix-web server to an ephemeral port and counts every request
//! it receives, so tests can assert that an operation stayed local.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::dev::{Service, ServerHandle};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use getnet::{AccessToken, ClientCredentials, ErrorResponseV1, ErrorResponseV2};

pub const ACCESS_TOKEN: &str = "7cdc8d2f-98e3-49b2-9129-fdf0f389c11c";
pub const CLIENT_ID: &str = "client-credentials-id-1";
pub const CLIENT_SECRET: &str = "client-credentials-secret-A";
pub const NUMBER_TOKEN: &str = "dfe05208b105578c070f806c80abd3af09e246827d29b866cf4ce16c205849977c9496cbf0d0234f42339937f327747075f68763537b90b31389e01231d4d13c";

pub struct MockGateway {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    handle: ServerHandle,
}

impl MockGateway {
    /// Start a mock gateway with the routes registered by `configure`.
    pub fn start<F>(configure: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
    {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock gateway");
        let port = listener.local_addr().expect("local addr").port();

        let server = HttpServer::new(move || {
            let counter = counter.clone();
            App::new()
                .wrap_fn(move |req, srv| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    srv.call(req)
                })
                .configure(configure.clone())
        })
        .workers(1)
        .listen(listener)
        .expect("listen mock gateway")
        .run();

        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            hits,
            handle,
        }
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Sandbox credentials pointed at this mock, with a bearer token.
    pub fn credentials(&self) -> ClientCredentials {
        ClientCredentials::new(CLIENT_ID, CLIENT_SECRET)
            .sandbox(true)
            .with_base_url(&self.base_url)
            .with_access_token(AccessToken::new(ACCESS_TOKEN, "Bearer", 3600, "oob"))
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn header<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Reject anything that is not an authenticated JSON call, V1 style.
pub fn require_bearer_json(req: &HttpRequest) -> Option<HttpResponse> {
    if header(req, "content-type") != "application/json; charset=utf-8" {
        return Some(HttpResponse::BadRequest().json(ErrorResponseV1 {
            message: "Mensagem detalhada do erro".into(),
            name: "Nome do modulo ou sistema em que o erro ocorreu".into(),
            details: vec![],
        }));
    }
    if header(req, "authorization") != format!("Bearer {ACCESS_TOKEN}") {
        return Some(HttpResponse::Unauthorized().json(ErrorResponseV1 {
            message: "Invalid Authorization".into(),
            name: "auth/bearer".into(),
            details: vec![],
        }));
    }
    None
}

pub fn v2_error(description: &str) -> ErrorResponseV2 {
    ErrorResponseV2 {
        error: "invalid_client".into(),
        error_description: description.into(),
    }
}
