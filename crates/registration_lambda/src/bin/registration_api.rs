use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, Select};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_dynamo::{from_item, to_item};
use serde_json::Value;

use registration_lambda::adapters::document_store::{DocumentStore, Item, KeyCondition};
use registration_lambda::handlers::router::{
    handle_route_event, ApiGatewayResponse, RouterConfig,
};

#[derive(Clone)]
struct DynamoDocumentStore {
    client: aws_sdk_dynamodb::Client,
}

impl DocumentStore for DynamoDocumentStore {
    fn scan(&self, table: &str, projection: Option<&str>) -> Result<Vec<Item>, String> {
        let client = self.client.clone();
        let table_name = table.to_string();
        let projection = projection.map(str::to_string);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let mut request = client.scan().table_name(table_name);
                if let Some(attribute) = projection {
                    request = request
                        .projection_expression("#p0")
                        .expression_attribute_names("#p0", attribute);
                }

                let output = request
                    .send()
                    .await
                    .map_err(|error| format!("failed to scan table: {error}"))?;
                decode_items(output.items.unwrap_or_default())
            })
        })
    }

    fn query(&self, table: &str, condition: &KeyCondition) -> Result<Vec<Item>, String> {
        let client = self.client.clone();
        let table_name = table.to_string();
        let attribute = condition.attribute.clone();
        let value = condition.value.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .query()
                    .table_name(table_name)
                    .key_condition_expression("#kn0 = :kv0")
                    .expression_attribute_names("#kn0", attribute)
                    .expression_attribute_values(":kv0", AttributeValue::S(value))
                    .select(Select::AllAttributes)
                    .send()
                    .await
                    .map_err(|error| format!("failed to query table: {error}"))?;
                decode_items(output.items.unwrap_or_default())
            })
        })
    }

    fn put(&self, table: &str, item: Item) -> Result<(), String> {
        let client = self.client.clone();
        let table_name = table.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let attributes: HashMap<String, AttributeValue> = to_item(item)
                    .map_err(|error| format!("failed to encode item: {error}"))?;
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(attributes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put item: {error}"))
            })
        })
    }
}

fn decode_items(items: Vec<HashMap<String, AttributeValue>>) -> Result<Vec<Item>, String> {
    items
        .into_iter()
        .map(|attributes| {
            from_item(attributes).map_err(|error| format!("failed to decode item: {error}"))
        })
        .collect()
}

fn table_config() -> RouterConfig {
    RouterConfig {
        users_table: std::env::var("REGISTRATION_TABLE")
            .unwrap_or_else(|_| "afscme-registration".to_string()),
        affiliations_table: std::env::var("AFFILIATION_TABLE")
            .unwrap_or_else(|_| "affiliate_state".to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // One store client for the whole process; invocations share it.
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoDocumentStore {
        client: aws_sdk_dynamodb::Client::new(&aws_config),
    };
    let config = table_config();

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let store = store.clone();
        let config = config.clone();
        async move {
            let response: ApiGatewayResponse =
                handle_route_event(event.payload, &config, &store);
            Ok::<ApiGatewayResponse, Error>(response)
        }
    }))
    .await
}
