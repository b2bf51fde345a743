//! REST client for the schedule endpoints.

use tracing::instrument;

use taskhub_core::Session;

use crate::error::ScheduleError;
use crate::types::{ApiEvent, EventsResponse, MembersResponse, TeamMember, WorkloadResponse};

/// Team roster plus whether its counts still need client-side backfill.
#[derive(Debug)]
pub struct Roster {
    pub members: Vec<TeamMember>,
    /// True when the roster came from the fallback members endpoint and
    /// workload arrived as zero.
    pub needs_backfill: bool,
}

pub struct ScheduleClient {
    client: reqwest::Client,
    session: Session,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(session: Session, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current user's tasks and projects as raw calendar records.
    #[instrument(skip(self), level = "info")]
    pub async fn personal_events(&self) -> Result<Vec<ApiEvent>, ScheduleError> {
        let resp: EventsResponse = self.get_json("/api/calendar/personal").await?;
        Ok(resp.events)
    }

    /// Team tasks and projects as raw calendar records.
    #[instrument(skip(self), level = "info")]
    pub async fn team_events(&self) -> Result<Vec<ApiEvent>, ScheduleError> {
        let resp: EventsResponse = self.get_json("/api/calendar/team").await?;
        Ok(resp.events)
    }

    /// Team members with server-computed workload counts.
    #[instrument(skip(self), level = "info")]
    pub async fn team_workload(&self) -> Result<Vec<TeamMember>, ScheduleError> {
        let resp: WorkloadResponse = self.get_json("/api/calendar/workload").await?;
        Ok(resp.team_members)
    }

    /// Basic member directory, without workload counts.
    #[instrument(skip(self), level = "info")]
    pub async fn team_members(&self) -> Result<Vec<TeamMember>, ScheduleError> {
        let resp: MembersResponse = self.get_json("/api/team/members").await?;
        Ok(resp.members)
    }

    /// Fetch the team roster, preferring the workload endpoint.
    ///
    /// When that endpoint is unavailable the plain member directory is used
    /// instead; its counts come back zeroed and the caller must backfill
    /// them from the event list.
    #[instrument(skip(self), level = "info")]
    pub async fn team_roster(&self) -> Result<Roster, ScheduleError> {
        match self.team_workload().await {
            Ok(members) => Ok(Roster {
                members,
                needs_backfill: false,
            }),
            Err(ScheduleError::EndpointUnavailable(path)) => {
                tracing::info!(
                    "Workload endpoint unavailable ({}), falling back to member directory",
                    path
                );
                let members = self.team_members().await?;
                Ok(Roster {
                    members,
                    needs_backfill: true,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ScheduleError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.session.bearer())
            .send()
            .await?;

        self.handle_response(response, path).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ScheduleError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ScheduleError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 || status.as_u16() == 422 {
            // The backend rejects both missing and malformed JWTs this way;
            // either one sends the caller back to the login boundary.
            Err(ScheduleError::SessionExpired)
        } else if status.as_u16() == 404 || status.as_u16() == 501 {
            Err(ScheduleError::EndpointUnavailable(path.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ScheduleError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ScheduleClient {
        ScheduleClient::new(Session::new("test_token"), &server.uri())
    }

    #[tokio::test]
    async fn test_personal_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/calendar/personal"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    {
                        "id": 1,
                        "title": "Complete Project Proposal",
                        "description": "Finalize and submit",
                        "start": "2024-01-10T00:00:00",
                        "end": "2024-01-10T23:59:59.999999",
                        "type": "task",
                        "status": "Ongoing"
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let events = client_for(&mock_server).personal_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Complete Project Proposal");
    }

    #[tokio::test]
    async fn test_team_events_with_null_start() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/calendar/team"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "events": [
                    {
                        "id": 4,
                        "title": "Design Review",
                        "start": null,
                        "end": null,
                        "type": "task",
                        "status": "Ongoing",
                        "assignee": "alice@example.com"
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        // Deserialization succeeds; the normalizer drops the record later.
        let events = client_for(&mock_server).team_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].start.is_none());
    }

    #[tokio::test]
    async fn test_session_expired_on_401_and_422() {
        for status in [401u16, 422] {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/api/calendar/personal"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&mock_server)
                .await;

            let result = client_for(&mock_server).personal_events().await;
            assert!(
                matches!(result, Err(ScheduleError::SessionExpired)),
                "status {} must map to SessionExpired",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_team_roster_prefers_workload_endpoint() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/calendar/workload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "team_members": [
                    {"id": 1, "name": "Alice Johnson", "email": "alice@example.com",
                     "role": "Developer", "workload": 3}
                ]
            })))
            .mount(&mock_server)
            .await;

        let roster = client_for(&mock_server).team_roster().await.unwrap();
        assert!(!roster.needs_backfill);
        assert_eq!(roster.members[0].workload, 3);
    }

    #[tokio::test]
    async fn test_team_roster_falls_back_to_member_directory() {
        for status in [404u16, 501] {
            let mock_server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/api/calendar/workload"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&mock_server)
                .await;

            Mock::given(method("GET"))
                .and(path("/api/team/members"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "members": [
                        {"id": 1, "name": "Alice Johnson", "email": "alice@example.com",
                         "role": "Developer"},
                        {"id": 2, "name": "Bob Smith", "email": "bob@example.com",
                         "role": "Designer"}
                    ]
                })))
                .mount(&mock_server)
                .await;

            let roster = client_for(&mock_server).team_roster().await.unwrap();
            assert!(
                roster.needs_backfill,
                "status {} must trigger the fallback",
                status
            );
            assert_eq!(roster.members.len(), 2);
            assert!(roster.members.iter().all(|m| m.workload == 0));
        }
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/calendar/personal"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).personal_events().await;
        match result {
            Err(ScheduleError::ApiError(msg)) => assert!(msg.contains("boom")),
            other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
        }
    }
}
