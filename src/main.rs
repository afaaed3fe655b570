use std::error::Error;
use std::sync::Arc;

use futures::future::FutureExt;
use log::{error, info, initialize_logger};
use tokio::sync::mpsc;
use warp::Filter;

use intake::clock::{Clock, SystemClock};
use intake::config::{load_schema, Config};
use intake::environment::{Environment, Forms};
use intake::routes;
use intake::schema::FormKind;
use intake::store::SupabaseStore;
use intake::submission::Submitter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let logger = initialize_logger();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(logger, "Invalid configuration"; "error" => %e);
            return Err(e.into());
        }
    };

    info!(logger, "Starting..."; "main_port" => config.port, "admin_port" => config.admin_port);
    let logger = Arc::new(logger);

    let forms = Forms::new(
        load_schema(FormKind::Application, config.schema_path(FormKind::Application))?,
        load_schema(FormKind::Contact, config.schema_path(FormKind::Contact))?,
    );
    info!(logger, "Loaded schemas"; "application_version" => forms.application.version, "contact_version" => forms.contact.version);

    let store = Arc::new(SupabaseStore::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let submitter = Arc::new(Submitter::new(store, clock.clone(), logger.clone()));

    let environment = Environment::new(logger.clone(), Arc::new(forms), submitter, clock);

    let (termination_sender, mut termination_receiver) = mpsc::channel::<()>(1);

    let terminate: routes::admin::TerminationFunctionWrapper = Arc::new(move || {
        let termination_sender = termination_sender.clone();

        async move {
            // the receiver only goes away once shutdown has begun
            termination_sender.send(()).await.ok();
        }
        .boxed()
    });

    let should_terminate = async move {
        termination_receiver.recv().await;
    }
    .shared();

    let ctrlc = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let signal = tokio::signal::ctrl_c();

        async move {
            tokio::select! {
                _ = should_terminate => {},
                _ = signal => {
                    terminate().await;
                }
            }
        }
    };

    let main_server = {
        let should_terminate = should_terminate.clone();
        let logger2 = logger.clone();

        let routes = routes::make_form_routes(environment.clone())
            .recover(move |r| routes::format_rejection(logger2.clone(), r));

        let (_, main_server) =
            warp::serve(routes).bind_with_graceful_shutdown(([0, 0, 0, 0], config.port), async {
                should_terminate.await;
            });

        main_server
    };

    let admin_server = {
        let should_terminate = should_terminate.clone();
        let terminate = terminate.clone();

        let routes = routes::admin::make_healthz_route(environment.clone()).or(
            routes::admin::make_termination_route(environment.clone(), terminate),
        );

        let (_, admin_server) = warp::serve(routes).bind_with_graceful_shutdown(
            ([0, 0, 0, 0], config.admin_port),
            async {
                should_terminate.await;
            },
        );

        admin_server
    };

    tokio::join!(ctrlc, main_server, admin_server);

    info!(logger, "Exiting gracefully...");

    Ok(())
}
