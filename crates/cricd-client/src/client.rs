//! HTTP implementation of the entity, match and event collaborators.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | team / umpire | `POST /teams`, `POST /umpires` with `{name}` |
//! | player | `POST /teams/{teamId}/players` with `{name, teams: [teamId]}` |
//! | match | `POST /matches` with the match record |
//! | events | `POST /matchEvents` with an array of ball events |
//!
//! Created resources answer with an `id` that may be a JSON string or
//! number; either way it becomes an [`EntityId`].

use async_trait::async_trait;
use cricd_core::{
    BallEvent, CollaboratorError, EntityBackend, EntityId, EntityKind, EventSink, MatchRegistry,
    NewMatch,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ClientError, Result};

#[derive(Serialize)]
struct NamedEntity<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct NewPlayer<'a> {
    name: &'a str,
    teams: [&'a EntityId; 1],
}

#[derive(Deserialize)]
struct Created {
    id: Value,
}

/// Client for the statistics API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(ApiClient {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn create_team(&self, name: &str) -> Result<EntityId> {
        self.create("teams", &NamedEntity { name }).await
    }

    pub async fn create_umpire(&self, name: &str) -> Result<EntityId> {
        self.create("umpires", &NamedEntity { name }).await
    }

    pub async fn create_player(&self, name: &str, team: &EntityId) -> Result<EntityId> {
        let path = format!("teams/{team}/players");
        self.create(&path, &NewPlayer { name, teams: [team] }).await
    }

    pub async fn post_match(&self, record: &NewMatch) -> Result<EntityId> {
        self.create("matches", record).await
    }

    /// Store a batch of events; returns how many the API reports stored.
    pub async fn post_events(&self, events: &[BallEvent]) -> Result<usize> {
        let stored: Vec<Value> = self.post("matchEvents", events).await?;
        Ok(stored.len())
    }

    async fn create<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<EntityId> {
        let url = self.config.url(path);
        let created: Created = self.post(path, body).await?;
        match created.id {
            Value::String(id) => Ok(EntityId(id)),
            Value::Number(id) => Ok(EntityId(id.to_string())),
            other => Err(ClientError::InvalidResponse {
                url,
                reason: format!("unexpected id {other}"),
            }),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        debug!(url = %url, "POST");

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                method: "POST",
                url,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::InvalidResponse {
                url,
                reason: err.to_string(),
            })
    }
}

#[async_trait]
impl EntityBackend for ApiClient {
    async fn create_entity(
        &self,
        kind: EntityKind,
        name: &str,
        team: Option<&EntityId>,
    ) -> std::result::Result<EntityId, CollaboratorError> {
        let id = match kind {
            EntityKind::Team => self.create_team(name).await?,
            EntityKind::Umpire => self.create_umpire(name).await?,
            EntityKind::Player => {
                let team = team.ok_or_else(|| ClientError::MissingTeam(name.to_string()))?;
                self.create_player(name, team).await?
            }
        };
        Ok(id)
    }
}

#[async_trait]
impl MatchRegistry for ApiClient {
    async fn create_match(
        &self,
        record: &NewMatch,
    ) -> std::result::Result<EntityId, CollaboratorError> {
        Ok(self.post_match(record).await?)
    }
}

#[async_trait]
impl EventSink for ApiClient {
    async fn submit(&self, events: &[BallEvent]) -> std::result::Result<usize, CollaboratorError> {
        Ok(self.post_events(events).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_body_lists_its_team() {
        let team = EntityId::from("7");
        let body = serde_json::to_value(NewPlayer {
            name: "AJ Finch",
            teams: [&team],
        })
        .unwrap();
        assert_eq!(body, json!({ "name": "AJ Finch", "teams": ["7"] }));
    }

    #[test]
    fn test_client_keeps_config() {
        let client = ApiClient::new(ApiConfig::new("stats", 8080)).unwrap();
        assert_eq!(client.config().base_url, "http://stats:8080");
    }
}
