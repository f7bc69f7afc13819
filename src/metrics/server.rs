//! HTTP pull endpoint serving the Prometheus text format.

use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle};
use actix_web::{web, App, HttpResponse, HttpServer};
use prometheus::Registry;

use super::{encode_registry, PrometheusSink};
use crate::error::{ExporterError, Result};

pub const METRICS_PATH: &str = "/metrics";
const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

const INDEX_HTML: &str = r#"<html>
<head><title>File Count Exporter</title></head>
<body>
<h1>File Count Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

/// Configure exporter routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route(METRICS_PATH, web::get().to(metrics));
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Metrics endpoint (Prometheus format)
async fn metrics(registry: web::Data<Registry>) -> HttpResponse {
    log::trace!("Metrics requested");

    match encode_registry(&registry) {
        Ok(body) => HttpResponse::Ok().content_type(CONTENT_TYPE).body(body),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Bound metrics listener, ready to run
pub struct MetricsServer {
    server: Server,
    local_addrs: Vec<SocketAddr>,
}

impl MetricsServer {
    /// Bind the listener.
    ///
    /// Must be called from within a Tokio runtime. A bind failure is fatal
    /// for the process and is reported as [`ExporterError::Bind`].
    pub fn bind(addr: SocketAddr, sink: &PrometheusSink) -> Result<Self> {
        let registry = sink.registry().clone();

        let http = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(registry.clone()))
                .configure(configure_routes)
        })
        .workers(1)
        .bind(addr)
        .map_err(|e| ExporterError::bind(addr, e))?;

        let local_addrs = http.addrs();
        let server = http.run();

        Ok(Self {
            server,
            local_addrs,
        })
    }

    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// Handle that can stop the server from another task
    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Serve until the server is stopped (SIGINT/SIGTERM or through its handle)
    pub async fn run(self) -> Result<()> {
        self.server.await?;
        Ok(())
    }
}
