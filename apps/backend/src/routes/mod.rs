//! The route table and the dispatcher that mounts it.
//!
//! Every endpoint is one [`RouteDef`] entry. `configure` walks the table
//! once at startup and wraps each entry with `JwtExtract` when it requires
//! authentication, so an authenticated handler can only be reached through
//! the token check.

use actix_web::http::Method;
use actix_web::{guard, web, Route};

use crate::middleware::JwtExtract;

pub mod auth;
pub mod health;
pub mod posts;
pub mod users;

pub struct RouteDef {
    pub path: &'static str,
    pub method: Method,
    /// Attaches the handler to a bare route
    pub handler: fn(Route) -> Route,
    pub requires_auth: bool,
}

pub static ROUTES: &[RouteDef] = &[
    // auth
    RouteDef {
        path: "/login",
        method: Method::POST,
        handler: |r| r.to(auth::login),
        requires_auth: false,
    },
    // users
    RouteDef {
        path: "/users",
        method: Method::POST,
        handler: |r| r.to(users::create),
        requires_auth: false,
    },
    RouteDef {
        path: "/users",
        method: Method::GET,
        handler: |r| r.to(users::search),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}",
        method: Method::GET,
        handler: |r| r.to(users::get),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}",
        method: Method::PUT,
        handler: |r| r.to(users::update),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}",
        method: Method::DELETE,
        handler: |r| r.to(users::delete),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/follow",
        method: Method::POST,
        handler: |r| r.to(users::follow),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/unfollow",
        method: Method::POST,
        handler: |r| r.to(users::unfollow),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/followers",
        method: Method::GET,
        handler: |r| r.to(users::followers),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/following",
        method: Method::GET,
        handler: |r| r.to(users::following),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/update-password",
        method: Method::POST,
        handler: |r| r.to(auth::update_password),
        requires_auth: true,
    },
    // posts
    RouteDef {
        path: "/posts",
        method: Method::POST,
        handler: |r| r.to(posts::create),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts",
        method: Method::GET,
        handler: |r| r.to(posts::feed),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts/{post_id}",
        method: Method::GET,
        handler: |r| r.to(posts::get),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts/{post_id}",
        method: Method::PUT,
        handler: |r| r.to(posts::update),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts/{post_id}",
        method: Method::DELETE,
        handler: |r| r.to(posts::delete),
        requires_auth: true,
    },
    RouteDef {
        path: "/users/{user_id}/posts",
        method: Method::GET,
        handler: |r| r.to(posts::by_user),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts/{post_id}/like",
        method: Method::POST,
        handler: |r| r.to(posts::like),
        requires_auth: true,
    },
    RouteDef {
        path: "/posts/{post_id}/dislike",
        method: Method::POST,
        handler: |r| r.to(posts::dislike),
        requires_auth: true,
    },
    // ops
    RouteDef {
        path: "/health",
        method: Method::GET,
        handler: |r| r.to(health::health),
        requires_auth: false,
    },
];

/// Mount every entry of [`ROUTES`].
///
/// Each entry becomes its own resource guarded by method, so entries that
/// share a path fall through to one another instead of answering 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for def in ROUTES {
        let route = (def.handler)(web::route().method(def.method.clone()));
        let resource = web::resource(def.path)
            .guard(guard::Method(def.method.clone()))
            .route(route);

        if def.requires_auth {
            cfg.service(resource.wrap(JwtExtract));
        } else {
            cfg.service(resource);
        }
    }
}
