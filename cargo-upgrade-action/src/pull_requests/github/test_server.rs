//! Scripted GitHub REST server for exercising [`GitHubHost`](super::GitHubHost).

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request the server received.
#[derive(Debug, Clone)]
pub(super) struct Received {
    pub method: String,
    /// Path and query.
    pub path: String,
    /// JSON body, `Null` when empty.
    pub body: Value,
}

struct Route {
    method: &'static str,
    path: String,
    status: u16,
    body: Value,
}

/// Canned responses keyed by method and exact path.
#[derive(Default)]
pub(super) struct ServerBuilder {
    routes: Vec<Route>,
}

impl ServerBuilder {
    pub fn route(
        mut self,
        method: &'static str,
        path: impl Into<String>,
        status: u16,
        body: Value,
    ) -> Self {
        self.routes.push(Route {
            method,
            path: path.into(),
            status,
            body,
        });
        self
    }

    pub async fn start(self) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        let routes = Arc::new(self.routes);
        let received = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&received);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let service = service_fn(move |req| respond(req, Arc::clone(&routes), Arc::clone(&log)));
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        TestServer { uri, received }
    }
}

pub(super) struct TestServer {
    pub uri: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl TestServer {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    /// `METHOD path` of every request, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.received()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    /// Body of the first request matching `method` and `path`.
    pub fn body_of(&self, method: &str, path: &str) -> Value {
        self.received()
            .into_iter()
            .find(|r| r.method == method && r.path == path)
            .map(|r| r.body)
            .unwrap_or_else(|| panic!("no {method} {path} request"))
    }
}

async fn respond(
    req: Request<Incoming>,
    routes: Arc<Vec<Route>>,
    log: Arc<Mutex<Vec<Received>>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let full_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| path.clone(), ToString::to_string);
    let bytes = req.into_body().collect().await?.to_bytes();
    log.lock().unwrap().push(Received {
        method: method.clone(),
        path: full_path,
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    });

    let (status, body) = routes
        .iter()
        .find(|route| route.method == method && route.path == path)
        .map_or_else(
            || {
                (
                    404,
                    json!({"message": "Not Found", "documentation_url": "https://docs.github.com/rest"}),
                )
            },
            |route| (route.status, route.body.clone()),
        );

    Ok(Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap())
}
