pub mod catalog;

use crate::utils::error::{QkamuraError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "qkamura-notify")]
#[command(about = "Find vacant qkamura rooms and notify a Slack channel")]
pub struct CliConfig {
    /// Qkamura location, e.g. tateyama, izu
    #[arg(long, default_value = "tateyama")]
    pub location: String,

    /// Stay dates as 8-digit YYYYMMDD integers
    #[arg(long, value_delimiter = ',', default_values_t = vec![20210731u32, 20210807])]
    pub stay_dates: Vec<u32>,

    /// Room IDs to watch, per the location's room catalog
    #[arg(long, value_delimiter = ',', default_values_t = vec![1u32, 7])]
    pub room_ids: Vec<u32>,

    /// Slack channel to notify
    #[arg(long)]
    pub slack_channel: String,

    /// Slack token to notify with
    #[arg(long)]
    pub slack_token: String,

    /// Qkamura API scheme
    #[arg(long, default_value = "https")]
    pub qkamura_scheme: String,

    /// Qkamura API host
    #[arg(long, default_value = "www.qkamura.or.jp")]
    pub qkamura_host: String,

    /// Slack API scheme
    #[arg(long, default_value = "https")]
    pub slack_scheme: String,

    /// Slack API host
    #[arg(long, default_value = "slack.com")]
    pub slack_host: String,

    /// Print results instead of posting to Slack
    #[arg(long)]
    pub debug: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("slack-channel", &self.slack_channel)?;
        validation::validate_non_empty_string("slack-token", &self.slack_token)?;
        validation::validate_non_empty_list("stay-dates", &self.stay_dates)?;
        validation::validate_non_empty_list("room-ids", &self.room_ids)?;
        validation::validate_endpoint("qkamura-host", &self.qkamura_scheme, &self.qkamura_host)?;
        validation::validate_endpoint("slack-host", &self.slack_scheme, &self.slack_host)?;

        let rooms = catalog::rooms(&self.location).ok_or_else(|| {
            QkamuraError::InvalidConfigValueError {
                field: "location".to_string(),
                value: self.location.clone(),
                reason: format!(
                    "unknown location, expected one of: {}",
                    catalog::known_locations().join(", ")
                ),
            }
        })?;
        for room_id in &self.room_ids {
            if catalog::room_description(&self.location, *room_id).is_none() {
                return Err(QkamuraError::InvalidConfigValueError {
                    field: "room-ids".to_string(),
                    value: room_id.to_string(),
                    reason: format!(
                        "unknown room for {}, expected one of: {}",
                        self.location,
                        rooms
                            .iter()
                            .map(|(id, _)| id.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                });
            }
        }

        Ok(())
    }
}
