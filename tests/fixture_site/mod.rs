#![allow(dead_code)]

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {status}"),
            delay: Duration::ZERO,
        }
    }

    pub fn slow(body: String, delay: Duration) -> Self {
        Self {
            status: 200,
            body,
            delay,
        }
    }
}

/// Local catalog server that records every requested path.
pub struct FixtureSite {
    pub base_url: String,
    requested: Arc<Mutex<Vec<String>>>,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FixtureSite {
    pub fn spawn<F>(route: F) -> Self
    where
        F: Fn(&str) -> Reply + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base_url = format!("http://{}/", server.server_addr());
        let requested = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let log = Arc::clone(&requested);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let path = request.url().to_string();
                log.lock().expect("lock request log").push(path.clone());

                let reply = route(&path);
                if !reply.delay.is_zero() {
                    thread::sleep(reply.delay);
                }

                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"text/html; charset=utf-8"[..],
                )
                .expect("build header");
                let response = tiny_http::Response::from_string(reply.body)
                    .with_status_code(reply.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            requested,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock request log").clone()
    }
}

impl Drop for FixtureSite {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn product(title: &str, price: &str, rating_class: &str) -> String {
    format!(
        r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
  <article class="product_pod">
    <div class="image_container">
      <a href="catalogue/book_1/index.html"><img src="media/cache/x.jpg" alt="{title}" class="thumbnail"></a>
    </div>
    <p class="{rating_class}">
      <i class="icon-star"></i><i class="icon-star"></i>
    </p>
    <h3><a href="catalogue/book_1/index.html" title="{title}">{title}</a></h3>
    <div class="product_price">
      <p class="price_color">{price}</p>
      <p class="instock availability">
        <i class="icon-ok"></i>
        In stock
      </p>
      <form><button type="submit" class="btn btn-primary btn-block">Add to basket</button></form>
    </div>
  </article>
</li>"#
    )
}

pub fn listing(products: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en-us">
  <head><meta charset="utf-8"><title>All products | Books to Scrape - Sandbox</title></head>
  <body>
    <div class="page_inner">
      <section>
        <ol class="row">
{}
        </ol>
        <ul class="pager"><li class="current">Page 1 of 50</li></ul>
      </section>
    </div>
  </body>
</html>
"#,
        products.join("\n")
    )
}

/// A page with `count` products titled `{prefix} {n}` priced `£{n}.99`.
pub fn numbered_listing(prefix: &str, count: usize) -> String {
    let products: Vec<String> = (1..=count)
        .map(|n| product(&format!("{prefix} {n}"), &format!("£{n}.99"), "star-rating Three"))
        .collect();
    listing(&products)
}
