use marketplace_client::{
    MarketplaceClient, MarketplaceClientConfig, MessageLog, PageNavigator,
    api::{MarketplaceChatClient, MarketplaceQueryClient},
    errors::MarketplaceClientError,
    types::{AccountStatus, PageArgs, Participant, VehicleFilter},
};
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::ServerGuard) -> anyhow::Result<MarketplaceClient> {
    Ok(MarketplaceClient::new(
        server.url().parse()?,
        MarketplaceClientConfig::default(),
    )?)
}

fn vehicle_json(id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Vehicle {id}"),
        "description": null,
        "year": 2020,
        "price": 15000.0,
        "mileage": 42000,
        "fuelType": "petrol",
        "transmission": "manual",
        "bodyType": null,
        "color": "red",
        "condition": null,
        "status": "AVAILABLE",
        "vendorId": 1,
        "brandId": 1,
        "modelId": 1,
        "brandName": "Toyota",
        "modelName": "Corolla",
        "vendorName": "City Motors",
        "createdAt": "2026-01-01T00:00:00Z",
        "updatedAt": "2026-01-01T00:00:00Z"
    })
}

fn message_json(id: i32, seen: bool) -> serde_json::Value {
    json!({
        "id": id,
        "sender": { "kind": "VENDOR", "id": 7 },
        "recipient": { "kind": "ADMIN", "id": 1 },
        "content": "hello",
        "isSent": true,
        "isSeen": seen,
        "createdAt": "2026-01-01T00:00:00Z"
    })
}

#[test_log::test(tokio::test)]
async fn vehicles_page_is_decoded_and_drives_navigation() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_header("accept", "application/json")
        .match_body(Matcher::PartialJson(json!({ "variables": { "first": 2 } })))
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": {
                    "vehicles": {
                        "edges": [
                            { "cursor": "Y3Vyc29yOjE=", "node": vehicle_json(1) },
                            { "cursor": "Y3Vyc29yOjI=", "node": vehicle_json(2) }
                        ],
                        "pageInfo": {
                            "startCursor": "Y3Vyc29yOjE=",
                            "endCursor": "Y3Vyc29yOjI=",
                            "hasNextPage": true,
                            "hasPreviousPage": false
                        },
                        "totalCount": 5
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server)?;
    let mut nav = PageNavigator::new(2);
    let args = nav.args_for(0);
    let page = client.vehicles(&args).await?;
    mock.assert_async().await;

    assert_eq!(page.total_count, 5);
    assert_eq!(page.edges[1].node.brand_name.as_deref(), Some("Toyota"));

    nav.page_loaded(0, args, page.page_info);
    assert!(nav.can_go_next());
    assert!(!nav.can_go_previous());
    assert_eq!(nav.args_for(1), PageArgs::forward(2, "Y3Vyc29yOjI="));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn filtered_query_sends_only_present_filters() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "brandId": 4, "minYear": 2015, "first": 10 }
        })))
        .with_body(
            json!({
                "data": {
                    "vehiclesFiltered": {
                        "edges": [],
                        "pageInfo": {
                            "startCursor": null,
                            "endCursor": null,
                            "hasNextPage": false,
                            "hasPreviousPage": false
                        },
                        "totalCount": 0
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let filter = VehicleFilter {
        brand_id: Some(4),
        min_year: Some(2015),
        ..Default::default()
    };
    let page = client_for(&server)?
        .vehicles_filtered(&filter, &PageArgs::first(10))
        .await?;
    mock.assert_async().await;

    assert!(page.edges.is_empty());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn graphql_errors_keep_their_codes() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/graphql")
        .with_body(
            json!({
                "data": null,
                "errors": [{
                    "message": "Cannot combine first and last",
                    "extensions": { "code": "INVALID_PAGINATION" }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = PageArgs {
        first: Some(1),
        last: Some(1),
        ..Default::default()
    };
    let err = client_for(&server)?
        .vendors_by_status(AccountStatus::Active, &page)
        .await
        .expect_err("server reported an error");

    assert!(matches!(err, MarketplaceClientError::GraphQl(_)));
    assert_eq!(err.codes(), vec!["INVALID_PAGINATION"]);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn polled_messages_feed_the_log_and_get_marked_seen() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let messages = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": {
                "participant": { "kind": "ADMIN", "id": 1 },
                "counterpart": { "kind": "VENDOR", "id": 7 },
                "last": 20
            }
        })))
        .with_body(
            json!({
                "data": {
                    "messages": {
                        "edges": [
                            { "cursor": "Y3Vyc29yOjM=", "node": message_json(3, true) },
                            { "cursor": "Y3Vyc29yOjQ=", "node": message_json(4, false) }
                        ],
                        "pageInfo": {
                            "startCursor": "Y3Vyc29yOjM=",
                            "endCursor": "Y3Vyc29yOjQ=",
                            "hasNextPage": false,
                            "hasPreviousPage": true
                        },
                        "totalCount": 4
                    }
                }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let mark_seen = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": {
                "reader": { "kind": "ADMIN", "id": 1 },
                "counterpart": { "kind": "VENDOR", "id": 7 },
                "upTo": 4
            }
        })))
        .with_body(json!({ "data": { "markMessagesSeen": 1 } }).to_string())
        .create_async()
        .await;

    let client = client_for(&server)?;
    let (admin, vendor) = (Participant::admin(1), Participant::vendor(7));
    let mut log = MessageLog::new(admin, vendor);

    let page = client.messages(admin, vendor, &log.poll_args(20)).await?;
    assert_eq!(log.append_newer(page), 2);
    assert!(log.has_older());
    assert_eq!(log.unseen_from_counterpart(), vec![4]);

    let newest_unseen = log.unseen_from_counterpart().last().copied();
    let updated = client.mark_messages_seen(admin, vendor, newest_unseen).await?;
    assert_eq!(updated, 1);
    if let Some(up_to) = newest_unseen {
        log.mark_seen_locally(up_to);
    }
    assert!(log.unseen_from_counterpart().is_empty());

    messages.assert_async().await;
    mark_seen.assert_async().await;
    Ok(())
}

#[test_log::test(tokio::test)]
async fn sent_message_shows_up_in_conversations() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let send = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": {
                "input": {
                    "sender": { "kind": "VENDOR", "id": 7 },
                    "recipient": { "kind": "ADMIN", "id": 1 },
                    "content": "hello"
                }
            }
        })))
        .with_body(json!({ "data": { "sendMessage": message_json(9, false) } }).to_string())
        .create_async()
        .await;
    let conversations = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "participant": { "kind": "ADMIN", "id": 1 } }
        })))
        .with_body(
            json!({
                "data": {
                    "conversations": [{
                        "counterpart": { "kind": "VENDOR", "id": 7 },
                        "lastMessage": message_json(9, false),
                        "unreadCount": 1
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server)?;
    let sent = client
        .send_message(Participant::vendor(7), Participant::admin(1), "hello")
        .await?;
    assert_eq!(sent.id, 9);
    assert!(sent.is_sent);

    let list = client.conversations(Participant::admin(1)).await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].counterpart, Participant::vendor(7));
    assert_eq!(list[0].last_message.id, 9);
    assert_eq!(list[0].unread_count, 1);

    send.assert_async().await;
    conversations.assert_async().await;
    Ok(())
}
