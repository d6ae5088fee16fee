mod assignment;
mod error;
mod job_schedulers;
mod lesson;
mod notification;
mod shared;
mod shift;
mod status;
#[cfg(test)]
mod test_utils;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{start_notification_evaluator, JobHandle};
use shift::ShiftSessions;
use std::{net::TcpListener, time::Duration};
use tracing_actix_web::TracingLogger;
use tutorhub_scheduler_infra::SchedulerContext;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    assignment::configure_routes(cfg);
    lesson::configure_routes(cfg);
    notification::configure_routes(cfg);
    shift::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    jobs: Vec<JobHandle>,
}

impl Application {
    pub async fn new(context: SchedulerContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let jobs = Application::start_job_schedulers(context);

        Ok(Self { server, port, jobs })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: SchedulerContext) -> Vec<JobHandle> {
        vec![start_notification_evaluator(context)]
    }

    async fn configure_server(context: SchedulerContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let shift_sessions = web::Data::new(ShiftSessions::new(Duration::from_millis(
            context.config.shift_preview_debounce_millis,
        )));
        let context = web::Data::new(context);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(context.clone())
                .app_data(shift_sessions.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Runs the server until it shuts down, the job schedulers stop with it
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        for job in &self.jobs {
            job.stop();
        }
        res
    }
}
