use std::time::Duration;

use reqwest::redirect::Policy as RedirectPolicy;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};

use crate::{
    api::{MarketplaceChatClient, MarketplaceQueryClient, Result},
    errors::{GraphQlError, MarketplaceClientError, RawGraphQlError},
    queries,
    types::{AccountStatus, Connection, Conversation, Message, PageArgs, Participant, Vehicle, VehicleFilter, Vendor},
};

/// Configuration for the [`MarketplaceClient`].
#[derive(Clone, Debug, PartialEq, Eq, smart_default::SmartDefault)]
pub struct MarketplaceClientConfig {
    /// General timeout for all requests.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

const REDIRECT_LIMIT: usize = 3;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    errors: Option<Vec<RawGraphQlError>>,
}

/// Client of the marketplace GraphQL API.
///
/// Every call is a fresh request; nothing is cached between calls. The client implements:
/// - [`MarketplaceQueryClient`]
/// - [`MarketplaceChatClient`]
#[derive(Clone, Debug)]
pub struct MarketplaceClient {
    base_url: url::Url,
    cfg: MarketplaceClientConfig,
    http: reqwest::Client,
}

impl MarketplaceClient {
    /// Creates a new instance given the API base URL and configuration.
    pub fn new(base_url: url::Url, cfg: MarketplaceClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(format!("marketplace-client/{}", env!("CARGO_PKG_VERSION")))
            .redirect(RedirectPolicy::limited(REDIRECT_LIMIT))
            .build()?;

        Ok(Self { base_url, cfg, http })
    }

    /// Returns the client's base URL.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &MarketplaceClientConfig {
        &self.cfg
    }

    fn graphql_url(&self) -> Result<url::Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(base.join("graphql")?)
    }

    /// Executes a GraphQL document and returns the whole `data` object.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Map<String, Value>> {
        tracing::debug!(query, %variables, "sending marketplace query");

        let body = self
            .http
            .post(self.graphql_url()?)
            .header("Accept", "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?
            .bytes()
            .await?;
        tracing::trace!(body = %String::from_utf8_lossy(body.as_ref()), "received marketplace response");

        response_to_data(serde_json::from_slice(&body)?)
    }

    /// Executes a GraphQL document and decodes the value of a single root field.
    pub async fn execute_field<T: DeserializeOwned>(&self, query: &str, variables: Value, field: &str) -> Result<T> {
        let mut data = self.execute(query, variables).await?;
        let value = data.remove(field).ok_or(MarketplaceClientError::NoData)?;
        Ok(serde_json::from_value(value)?)
    }
}

fn response_to_data(response: GraphQlResponse) -> Result<Map<String, Value>> {
    match (response.data, response.errors) {
        (Some(data), None) => Ok(data),
        (Some(data), Some(errors)) if errors.is_empty() => Ok(data),
        (_, Some(errors)) if !errors.is_empty() => {
            let errors: Vec<GraphQlError> = errors.into_iter().map(GraphQlError::from).collect();
            tracing::debug!(?errors, "operation returned errors");
            Err(MarketplaceClientError::GraphQl(errors))
        }
        _ => Err(MarketplaceClientError::NoData),
    }
}

/// Merges the page arguments and any extra object fields into one variables object.
fn variables_with_page<S: Serialize>(extra: &S, page: &PageArgs) -> Result<Value> {
    let mut vars = match serde_json::to_value(extra)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(page) = serde_json::to_value(page)? {
        vars.extend(page);
    }
    Ok(Value::Object(vars))
}

#[async_trait::async_trait]
impl MarketplaceQueryClient for MarketplaceClient {
    async fn query_health(&self) -> Result<String> {
        self.execute_field(queries::HEALTH, json!({}), "health").await
    }

    async fn query_version(&self) -> Result<String> {
        self.execute_field(queries::VERSION, json!({}), "version").await
    }

    async fn vehicle(&self, id: i32) -> Result<Option<Vehicle>> {
        self.execute_field(queries::VEHICLE, json!({ "id": id }), "vehicle").await
    }

    async fn vehicles(&self, page: &PageArgs) -> Result<Connection<Vehicle>> {
        self.execute_field(queries::VEHICLES, variables_with_page(&json!({}), page)?, "vehicles")
            .await
    }

    async fn vehicles_filtered(&self, filter: &VehicleFilter, page: &PageArgs) -> Result<Connection<Vehicle>> {
        self.execute_field(
            queries::VEHICLES_FILTERED,
            variables_with_page(filter, page)?,
            "vehiclesFiltered",
        )
        .await
    }

    async fn vendors_by_status(&self, status: AccountStatus, page: &PageArgs) -> Result<Connection<Vendor>> {
        self.execute_field(
            queries::VENDORS_BY_STATUS,
            variables_with_page(&json!({ "status": status }), page)?,
            "vendorsByStatus",
        )
        .await
    }
}

#[async_trait::async_trait]
impl MarketplaceChatClient for MarketplaceClient {
    async fn messages(
        &self,
        participant: Participant,
        counterpart: Participant,
        page: &PageArgs,
    ) -> Result<Connection<Message>> {
        self.execute_field(
            queries::MESSAGES,
            variables_with_page(&json!({ "participant": participant, "counterpart": counterpart }), page)?,
            "messages",
        )
        .await
    }

    async fn conversations(&self, participant: Participant) -> Result<Vec<Conversation>> {
        self.execute_field(
            queries::CONVERSATIONS,
            json!({ "participant": participant }),
            "conversations",
        )
        .await
    }

    async fn unread_message_count(&self, participant: Participant) -> Result<i64> {
        self.execute_field(
            queries::UNREAD_MESSAGE_COUNT,
            json!({ "participant": participant }),
            "unreadMessageCount",
        )
        .await
    }

    async fn send_message(&self, sender: Participant, recipient: Participant, content: &str) -> Result<Message> {
        let input = json!({ "sender": sender, "recipient": recipient, "content": content });
        self.execute_field(queries::SEND_MESSAGE, json!({ "input": input }), "sendMessage")
            .await
    }

    async fn mark_messages_seen(
        &self,
        reader: Participant,
        counterpart: Participant,
        up_to: Option<i32>,
    ) -> Result<i64> {
        self.execute_field(
            queries::MARK_MESSAGES_SEEN,
            json!({ "reader": reader, "counterpart": counterpart, "upTo": up_to }),
            "markMessagesSeen",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_url_appends_path() -> anyhow::Result<()> {
        let client = MarketplaceClient::new("http://localhost:8080/api".parse()?, Default::default())?;
        assert_eq!(client.graphql_url()?.as_str(), "http://localhost:8080/api/graphql");

        let client = MarketplaceClient::new("http://localhost:8080".parse()?, Default::default())?;
        assert_eq!(client.graphql_url()?.as_str(), "http://localhost:8080/graphql");
        Ok(())
    }

    #[test]
    fn variables_merge_filter_and_page() -> anyhow::Result<()> {
        let filter = VehicleFilter {
            brand_id: Some(3),
            search: Some("corolla".into()),
            ..Default::default()
        };
        let vars = variables_with_page(&filter, &PageArgs::forward(10, "abc"))?;
        assert_eq!(
            vars,
            json!({ "brandId": 3, "search": "corolla", "first": 10, "after": "abc" })
        );
        Ok(())
    }

    #[test]
    fn errors_take_precedence_over_partial_data() -> anyhow::Result<()> {
        let response: GraphQlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "Vehicle not found", "extensions": { "code": "NOT_FOUND" } }]
        }))?;
        match response_to_data(response) {
            Err(MarketplaceClientError::GraphQl(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code.as_deref(), Some("NOT_FOUND"));
            }
            other => anyhow::bail!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn missing_data_and_errors_is_no_data() -> anyhow::Result<()> {
        let response: GraphQlResponse = serde_json::from_value(json!({}))?;
        assert!(matches!(response_to_data(response), Err(MarketplaceClientError::NoData)));
        Ok(())
    }
}
