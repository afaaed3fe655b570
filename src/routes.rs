use std::sync::Arc;

use log::{error, warn, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Json, WithStatus};

use crate::errors::IntakeError;

pub mod admin;
mod handlers;
mod rejection;
mod response;

pub use internal::*;

/// The largest request body to accept. A filled-in form is a few
/// kilobytes at most.
const MAX_CONTENT_LENGTH: u64 = 64 * 1024;

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<WithStatus<Json>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let e = &r.error;
        let status = status_code_for(e);

        if status.is_server_error() {
            error!(logger, "Intake error"; "context" => ?r.context, "error" => ?r.error, "status" => %status, "message" => %r.error);
        } else {
            warn!(logger, "Refused request"; "context" => ?r.context, "error" => ?r.error, "status" => %status, "message" => %r.error);
        }

        let flattened = r.flatten();

        return Ok(with_status(json(&flattened), status));
    }

    Err(rej)
}

fn status_code_for(e: &IntakeError) -> StatusCode {
    use IntakeError::*;

    match e {
        UnknownForm(..) => StatusCode::NOT_FOUND,
        Form(..) | MalformedValue { .. } | MalformedSubmission => StatusCode::BAD_REQUEST,
    }
}

mod internal {
    use serde_json::Value;
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{body, get as g, path as p, path::param as par, post};

    use super::{handlers, MAX_CONTENT_LENGTH};
    use crate::environment::Environment;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
        ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
        ($route_variable:ident; $first:expr, $($rest:expr),+) => (
            let $route_variable = $route_variable.and($first);
            route_filter!($route_variable; $($rest),+);
        )
    }

    macro_rules! route {
        ($name:ident => $handler:ident, $route_variable:ident; $($filters:expr),+) => (
            pub fn $name(environment: Environment) -> Route {
                let $route_variable = warp::any().map(move || environment.clone());

                route_filter!($route_variable; $($filters),+);

                $route_variable.and_then(handlers::$handler)
                    .boxed()
            }
        );
    }

    route!(make_schema_route => schema, rt; par::<String>(), p("schema"), end(), g());
    route!(make_validate_route => validate, rt; par::<String>(), p("validate"), end(), post(), body::content_length_limit(MAX_CONTENT_LENGTH), body::json::<Value>());
    route!(make_submit_route => submit, rt; par::<String>(), end(), post(), body::content_length_limit(MAX_CONTENT_LENGTH), body::json::<Value>());

    /// Every public route, combined.
    pub fn make_form_routes(environment: Environment) -> Route {
        make_schema_route(environment.clone())
            .or(make_validate_route(environment.clone()))
            .unify()
            .or(make_submit_route(environment))
            .unify()
            .boxed()
    }
}
