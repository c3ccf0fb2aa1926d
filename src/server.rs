//! actix-web bridge for a started [`Dispatcher`].
//!
//! The server owns no routes of its own: a single default service forwards
//! every request to the dispatcher, and the dispatcher's response is written
//! back as JSON or as a raw binary body.

use actix_cors::Cors;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tracing::{error, info};

use crate::error::ViewerError;
use crate::router::{Body, Dispatcher, Response};

/// Wide-open CORS policy for a local developer tool.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Mounts `dispatcher` as the default service of an app.
pub fn configure<S>(cfg: &mut web::ServiceConfig, dispatcher: web::Data<Dispatcher<S>>)
where
    S: Send + Sync + 'static,
{
    cfg.app_data(dispatcher)
        .default_service(web::route().to(dispatch::<S>));
}

/// Binds `address` and serves until the server is stopped.
pub async fn serve<S>(dispatcher: Dispatcher<S>, address: &str) -> Result<(), ViewerError>
where
    S: Send + Sync + 'static,
{
    let dispatcher = web::Data::new(dispatcher);
    let server = HttpServer::new(move || {
        let dispatcher = dispatcher.clone();
        App::new()
            .wrap(cors())
            .configure(move |cfg| configure(cfg, dispatcher))
    })
    .bind(address)
    .map_err(|source| ViewerError::ServerStart {
        address: address.to_string(),
        source,
    })?;

    info!(%address, "listening");
    server.run().await?;
    Ok(())
}

async fn dispatch<S>(req: HttpRequest, dispatcher: web::Data<Dispatcher<S>>) -> HttpResponse
where
    S: Send + Sync + 'static,
{
    let method = req.method().clone();
    // Raw path: route parameters are bound without percent-decoding.
    let path = req.path().to_string();

    match web::block(move || dispatcher.handle(&method, &path)).await {
        Ok(response) => into_http_response(response),
        Err(err) => {
            error!(error = %err, "blocking dispatch failed");
            into_http_response(Response::detail(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ))
        }
    }
}

fn into_http_response(response: Response) -> HttpResponse {
    let mut builder = HttpResponse::build(response.status);
    match response.body {
        Body::Json(value) => builder.json(value),
        Body::Binary {
            content,
            content_type,
        } => builder.content_type(content_type.to_string()).body(content),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    use super::*;
    use crate::router::{Reply, RouterBuilder};

    fn dispatcher() -> web::Data<Dispatcher<()>> {
        let dispatcher = RouterBuilder::new()
            .get("/hello/{name}", |_: &(), params| {
                Reply::json(&params.get("name"))
            })
            .build()
            .start(())
            .expect("start router");
        web::Data::new(dispatcher)
    }

    #[actix_web::test]
    async fn forwards_raw_path_to_dispatcher() {
        let data = dispatcher();
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .configure(move |cfg| configure(cfg, data)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/hello/a%20b")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!("a%20b"));
    }

    #[actix_web::test]
    async fn unknown_path_is_json_404() {
        let data = dispatcher();
        let app = test::init_service(App::new().configure(move |cfg| configure(cfg, data))).await;

        let req = test::TestRequest::get().uri("/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"detail": "Not Found"}));
    }

    #[actix_web::test]
    async fn cors_allows_any_origin() {
        let data = dispatcher();
        let app = test::init_service(
            App::new()
                .wrap(cors())
                .configure(move |cfg| configure(cfg, data)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/hello/world")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("http://localhost:5173")
        );
    }
}
