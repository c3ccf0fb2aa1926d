//! Route table, dispatcher and response serialization.
//!
//! Routes are registered on a [`RouterBuilder`], frozen into a [`Router`],
//! and then started against the application state to obtain a
//! [`Dispatcher`]. Starting runs every startup hook once; only a successful
//! start produces something that can serve requests.
//!
//! ```
//! use actix_web::http::{Method, StatusCode};
//! use yolo_viewer::router::{Reply, RouterBuilder};
//!
//! let dispatcher = RouterBuilder::<u32>::new()
//!     .get("/answer", |state: &u32, _params| Reply::json(state))
//!     .build()
//!     .start(42)
//!     .expect("no startup hooks to fail");
//!
//! let response = dispatcher.handle(&Method::GET, "/answer");
//! assert_eq!(response.status, StatusCode::OK);
//! assert_eq!(response.json(), Some(&serde_json::json!(42)));
//! ```

mod response;
mod template;

pub use response::{Body, HttpError, Reply, Response};
pub use template::{PathParams, PathTemplate};

use actix_web::http::{Method, StatusCode};
use tracing::{debug, info};

use crate::error::ViewerError;

type Handler<S> = Box<dyn Fn(&S, &PathParams) -> Result<Reply, HttpError> + Send + Sync>;
type StartupHook<S> = Box<dyn Fn(&S) -> Result<(), ViewerError> + Send + Sync>;

/// A single registered route.
pub struct Route<S> {
    method: Method,
    template: PathTemplate,
    handler: Handler<S>,
}

impl<S> Route<S> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    fn matches(&self, method: &Method, path: &str) -> Option<PathParams> {
        if *method != self.method {
            return None;
        }
        self.template.matches(path)
    }
}

/// Collects routes and startup hooks before the table is frozen.
pub struct RouterBuilder<S> {
    routes: Vec<Route<S>>,
    startup: Vec<StartupHook<S>>,
}

impl<S> Default for RouterBuilder<S> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            startup: Vec::new(),
        }
    }
}

impl<S> RouterBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `method` on `template`.
    ///
    /// Registration order is match order: when templates overlap, the route
    /// registered first wins.
    pub fn route<F>(mut self, method: Method, template: &str, handler: F) -> Self
    where
        F: Fn(&S, &PathParams) -> Result<Reply, HttpError> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            template: PathTemplate::parse(template),
            handler: Box::new(handler),
        });
        self
    }

    /// Registers a `GET` handler.
    pub fn get<F>(self, template: &str, handler: F) -> Self
    where
        F: Fn(&S, &PathParams) -> Result<Reply, HttpError> + Send + Sync + 'static,
    {
        self.route(Method::GET, template, handler)
    }

    /// Registers a hook that runs once when the router is started.
    pub fn on_startup<F>(mut self, hook: F) -> Self
    where
        F: Fn(&S) -> Result<(), ViewerError> + Send + Sync + 'static,
    {
        self.startup.push(Box::new(hook));
        self
    }

    /// Freezes the route table.
    pub fn build(self) -> Router<S> {
        Router {
            routes: self.routes,
            startup: self.startup,
        }
    }
}

/// An immutable route table that has not been started yet.
pub struct Router<S> {
    routes: Vec<Route<S>>,
    startup: Vec<StartupHook<S>>,
}

impl<S> Router<S> {
    pub fn routes(&self) -> &[Route<S>] {
        &self.routes
    }

    /// Finds the first route matching `method` and `path`.
    pub fn find(&self, method: &Method, path: &str) -> Option<(&Route<S>, PathParams)> {
        self.routes
            .iter()
            .find_map(|route| route.matches(method, path).map(|params| (route, params)))
    }

    /// Runs the startup hooks in registration order, then hands back a
    /// dispatcher bound to `state`.
    ///
    /// The first failing hook aborts the start and its error is returned.
    pub fn start(self, state: S) -> Result<Dispatcher<S>, ViewerError> {
        for hook in &self.startup {
            hook(&state)?;
        }
        info!(routes = self.routes.len(), "router started");

        Ok(Dispatcher {
            router: self,
            state,
        })
    }
}

/// A started router, ready to serve requests.
///
/// The route table and state are read-only from here on, so a dispatcher can
/// be shared between threads without locking.
pub struct Dispatcher<S> {
    router: Router<S>,
    state: S,
}

impl<S> Dispatcher<S> {
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn router(&self) -> &Router<S> {
        &self.router
    }

    /// Routes one request and produces its response.
    pub fn handle(&self, method: &Method, path: &str) -> Response {
        let Some((route, params)) = self.router.find(method, path) else {
            debug!(%method, path, "no route matched");
            return Response::detail(StatusCode::NOT_FOUND, "Not Found");
        };

        debug!(%method, path, route = %route.template, "dispatching");
        let outcome = (route.handler)(&self.state, &params).and_then(Reply::into_body);
        match outcome {
            Ok(body) => Response {
                status: StatusCode::OK,
                body,
            },
            Err(err) => Response::detail(err.status, err.detail),
        }
    }
}
