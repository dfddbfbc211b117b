use crate::adapters::qkamura::QkamuraClient;
use crate::adapters::slack::SlackClient;
use crate::config::catalog;
use crate::domain::model::{covering_range, parse_provider_date, parse_stay_date, StayRequest};
use crate::utils::error::{QkamuraError, Result};
use std::collections::HashSet;

/// Single-run orchestration: fetch the vacancy grid once for the covering date
/// range, match it against the requested rooms and dates, and notify when
/// anything is bookable.
pub struct VacancyEngine {
    qkamura_client: QkamuraClient,
    slack_client: SlackClient,
    request: StayRequest,
    slack_channel: String,
    slack_token: String,
    debug: bool,
}

impl VacancyEngine {
    pub fn new(
        qkamura_client: QkamuraClient,
        slack_client: SlackClient,
        request: StayRequest,
        slack_channel: impl Into<String>,
        slack_token: impl Into<String>,
        debug: bool,
    ) -> Self {
        Self {
            qkamura_client,
            slack_client,
            request,
            slack_channel: slack_channel.into(),
            slack_token: slack_token.into(),
            debug,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Stay dates must parse before any network call.
        let (start_date, end_date) = covering_range(&self.request.stay_dates)?;
        let mut wanted_dates = HashSet::new();
        for value in &self.request.stay_dates {
            wanted_dates.insert(parse_stay_date(*value)?);
        }
        let wanted_rooms: HashSet<u32> = self.request.room_ids.iter().copied().collect();

        // One request over the whole range, then pick out the requested dates.
        let reservation = self
            .qkamura_client
            .get(&self.request.location, start_date, end_date)
            .await?;

        let mut fragments = Vec::new();
        for room in &reservation.rooms {
            if !wanted_rooms.contains(&room.room_id) {
                continue;
            }
            for vacancy in &room.vacancies {
                let Some(date) = parse_provider_date(&vacancy.date) else {
                    tracing::warn!(
                        date = %vacancy.date,
                        room_id = room.room_id,
                        "unparseable vacancy date, skipping"
                    );
                    continue;
                };
                if !wanted_dates.contains(&date) {
                    continue;
                }
                tracing::info!(
                    location = %self.request.location,
                    room_id = room.room_id,
                    date = %vacancy.date,
                    count = vacancy.count,
                    "vacancy status"
                );
                if vacancy.count > 0 {
                    let room_detail =
                        catalog::room_description(&self.request.location, room.room_id)
                            .unwrap_or("(unknown room)");
                    fragments.push(format!(
                        "日付:{}\n部屋タイプ: {}\n室数: {}",
                        vacancy.date, room_detail, vacancy.count
                    ));
                }
            }
        }

        if fragments.is_empty() {
            tracing::info!(
                location = %self.request.location,
                "no vacancy matched the requested rooms and dates"
            );
            return Ok(());
        }

        let message = format!(
            "Qkamura vacancy notification\n\nlocation: {}\n{}",
            self.request.location,
            fragments.join("\n")
        );
        if self.debug {
            println!("{}", message);
            return Ok(());
        }
        if let Err(e) = self
            .slack_client
            .post(&self.slack_channel, &self.slack_token, &message)
            .await
        {
            return Err(QkamuraError::NotifyError {
                source: Box::new(e),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{HttpConfig, RetryingClient};
    use httpmock::prelude::*;
    use std::time::Duration;

    // Room 1 has one bookable date (2021/8/6) and one sold-out date; room 3 is
    // not requested in most tests below.
    const QKAMURA_RESPONSE: &str = "getStockData({'rooms': [\
        {'room_id': '1', 'aki': [\
            {'aki_date': '2021/8/6', 'aki_num': '3'}, \
            {'aki_date': '2021/8/7', 'aki_num': '0'}]}, \
        {'room_id': '3', 'aki': [\
            {'aki_date': '2021/8/6', 'aki_num': '2'}]}]})";

    fn build_engine(
        qkamura_server: &MockServer,
        slack_server: &MockServer,
        stay_dates: Vec<u32>,
        room_ids: Vec<u32>,
        debug: bool,
    ) -> VacancyEngine {
        let http = RetryingClient::new(HttpConfig {
            timeout: Duration::from_secs(5),
            max_retries: 0,
            retry_wait_min: Duration::from_millis(1),
            retry_wait_max: Duration::from_millis(5),
        })
        .unwrap();
        let qkamura_client = QkamuraClient::new(
            http.clone(),
            "http",
            qkamura_server.address().to_string(),
        );
        let slack_client =
            SlackClient::new(http, "http", slack_server.address().to_string());
        VacancyEngine::new(
            qkamura_client,
            slack_client,
            StayRequest {
                location: "tateyama".to_string(),
                stay_dates,
                room_ids,
            },
            "#vacancy",
            "xoxb-dummy",
            debug,
        )
    }

    fn mock_qkamura(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/qkamura/api/ypro/v2/ypro_stocksearch_api.asp")
                .query_param("id", "23260012")
                .query_param("roomId", "all");
            then.status(200).body(QKAMURA_RESPONSE);
        })
    }

    #[tokio::test]
    async fn test_matching_vacancy_notifies_slack() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        let qkamura_mock = mock_qkamura(&qkamura_server);
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST)
                .path("/api/chat.postMessage")
                .body_contains("2021/8/6")
                .body_contains("室数: 3");
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210731, 20210806],
            vec![1, 7],
            false,
        );
        engine.run().await.unwrap();

        qkamura_mock.assert();
        slack_mock.assert();
    }

    #[tokio::test]
    async fn test_unrequested_date_produces_no_notification() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        mock_qkamura(&qkamura_server);
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(200);
        });

        // 20210806 absent; the only requested date with inventory data is sold out
        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210731, 20210807],
            vec![1, 7],
            false,
        );
        engine.run().await.unwrap();

        slack_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_unrequested_room_produces_no_notification() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        mock_qkamura(&qkamura_server);
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(200);
        });

        // room 3 has inventory on 2021/8/6 but only room 7 is requested
        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210806],
            vec![7],
            false,
        );
        engine.run().await.unwrap();

        slack_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_all_zero_counts_is_a_normal_outcome() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        qkamura_server.mock(|when, then| {
            when.method(GET)
                .path("/qkamura/api/ypro/v2/ypro_stocksearch_api.asp");
            then.status(200).body(
                "getStockData({'rooms': [{'room_id': '1', 'aki': [\
                 {'aki_date': '2021/8/6', 'aki_num': '0'}]}]})",
            );
        });
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(200);
        });

        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210806],
            vec![1],
            false,
        );
        engine.run().await.unwrap();

        slack_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_malformed_stay_date_fails_before_any_request() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        let qkamura_mock = mock_qkamura(&qkamura_server);

        // 2021731 has 7 digits
        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![2021731, 20210806],
            vec![1],
            false,
        );
        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, QkamuraError::DateFormatError { .. }));
        qkamura_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_provider_error_aborts_the_run() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        qkamura_server.mock(|when, then| {
            when.method(GET)
                .path("/qkamura/api/ypro/v2/ypro_stocksearch_api.asp");
            then.status(500).body("internal error");
        });
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(200);
        });

        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210806],
            vec![1],
            false,
        );
        let err = engine.run().await.unwrap_err();

        assert!(err.to_string().contains("500"));
        slack_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_slack_failure_carries_the_composed_message() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        mock_qkamura(&qkamura_server);
        slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(503).body("service unavailable");
        });

        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210806],
            vec![1],
            false,
        );
        let err = engine.run().await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("Qkamura vacancy notification"));
        assert!(message.contains("2021/8/6"));
    }

    #[tokio::test]
    async fn test_debug_mode_never_posts() {
        let qkamura_server = MockServer::start();
        let slack_server = MockServer::start();
        let qkamura_mock = mock_qkamura(&qkamura_server);
        let slack_mock = slack_server.mock(|when, then| {
            when.method(POST).path("/api/chat.postMessage");
            then.status(200);
        });

        let engine = build_engine(
            &qkamura_server,
            &slack_server,
            vec![20210806],
            vec![1],
            true,
        );
        engine.run().await.unwrap();

        qkamura_mock.assert();
        slack_mock.assert_hits(0);
    }
}
