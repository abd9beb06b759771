use pastel_bridge::{config, server, telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;

    telemetry::init(&config.observability)?;

    server::run(config).await
}
