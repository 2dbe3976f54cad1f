use skybook::utils::config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skybook=info,rocket=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let rocket = skybook::build_rocket(config)
        .await
        .expect("failed to assemble application");

    let _ = rocket.launch().await?;
    Ok(())
}
