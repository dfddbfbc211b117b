use clap::Parser;
use qkamura_notify::utils::{logger, validation::Validate};
use qkamura_notify::{
    CliConfig, HttpConfig, QkamuraClient, RetryingClient, SlackClient, StayRequest, VacancyEngine,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting qkamura-notify");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let http = match RetryingClient::new(HttpConfig::default()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let qkamura_client =
        QkamuraClient::new(http.clone(), &config.qkamura_scheme, &config.qkamura_host);
    let slack_client = SlackClient::new(http, &config.slack_scheme, &config.slack_host);
    let request = StayRequest {
        location: config.location.clone(),
        stay_dates: config.stay_dates.clone(),
        room_ids: config.room_ids.clone(),
    };
    let engine = VacancyEngine::new(
        qkamura_client,
        slack_client,
        request,
        &config.slack_channel,
        &config.slack_token,
        config.debug,
    );

    match engine.run().await {
        Ok(()) => {
            tracing::info!("✅ Vacancy check completed");
        }
        Err(e) => {
            tracing::error!("❌ Vacancy check failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
