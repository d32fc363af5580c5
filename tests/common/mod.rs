//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use prerender::config::AppConfig;
use prerender::extract::{RouteDescriptor, RouteTable};
use prerender::http::SiteState;
use prerender::markup::BaseTemplate;
use prerender::render::{HandlerRegistry, RenderContext, RenderNode};
use prerender::{HttpServer, RenderCache, Shutdown};
use tokio::net::TcpListener;

pub const HEAD: &str = "<!-- {{%HEAD_FOR_SSR%}} -->";
pub const BODY: &str = "<!-- {{%BODY_FOR_SSR%}} -->";

/// Base page used by every test site.
pub fn template_html() -> String {
    format!("<html><head><title>app</title>{HEAD}</head><body><div id=\"root\"></div>{BODY}</body></html>")
}

/// Handlers: `layout` (global head meta), `home`, `about`, `script`, and
/// `broken`, which always fails.
pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register("layout", |cx: &mut RenderContext| {
            cx.insert(RenderNode::new("meta", "meta").parent("head"));
            Ok(())
        })
        .register("home", |cx: &mut RenderContext| {
            cx.insert(RenderNode::new("home", "main").parent("body").text("Welcome home"));
            Ok(())
        })
        .register("about", |cx: &mut RenderContext| {
            cx.insert(RenderNode::new("about", "main").parent("body").text("About us"));
            Ok(())
        })
        .register("script", |cx: &mut RenderContext| {
            cx.insert(RenderNode::new("script", "p").parent("body").text("not a script"));
            Ok(())
        })
        .register("broken", |_cx: &mut RenderContext| Err("window is not defined".into()));
    registry
}

/// Route table for the test site. `/app.js` is deliberately registered to
/// show that dotted paths bypass the cache.
pub fn route_table() -> RouteTable {
    let mut table = RouteTable::new();
    table.push_global("layout");
    table.insert_route(RouteDescriptor::new("home", "/", true));
    table.insert_route(RouteDescriptor::new("about", "/about", true));
    table.insert_route(RouteDescriptor::new("broken", "/broken", true));
    table.insert_route(RouteDescriptor::new("script", "/app.js", true));
    table
}

pub fn site(output_folder: &Path) -> SiteState {
    let cache = RenderCache::populate(&route_table(), &registry());
    SiteState::new(cache, BaseTemplate::new(template_html(), HEAD, BODY), output_folder)
}

/// Start the server on an ephemeral port.
pub async fn start_server(site: SiteState) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppConfig::default(), site);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
