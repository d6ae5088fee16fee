mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use tracing::info;
use tutorhub_scheduler_api::Application;
use tutorhub_scheduler_infra::{run_migration, setup_context};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("tutorhub_scheduler_server".into(), "info".into());
    init_subscriber(subscriber);

    run_migration()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    info!("Database migrations applied");

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
