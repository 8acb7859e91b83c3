//! Integration tests for brand and model queries and mutations

mod common;

use serde_json::json;

async fn create_brand(ctx: &common::TestContext, name: &str) -> anyhow::Result<i64> {
    let data = common::execute(
        &ctx.schema,
        "mutation($name: String!) { createBrand(input: { name: $name }) { id status } }",
        json!({ "name": name }),
    )
    .await?;
    assert_eq!(data["createBrand"]["status"], "ACTIVE");
    data["createBrand"]["id"]
        .as_i64()
        .ok_or_else(|| anyhow::anyhow!("missing brand id"))
}

async fn create_model(ctx: &common::TestContext, brand_id: i64, name: &str) -> anyhow::Result<serde_json::Value> {
    let data = common::execute(
        &ctx.schema,
        r#"mutation($brandId: Int!, $name: String!) {
            createModel(input: { brandId: $brandId, name: $name }) { id name brandId brandName status }
        }"#,
        json!({ "brandId": brand_id, "name": name }),
    )
    .await?;
    Ok(data["createModel"].clone())
}

#[test_log::test(tokio::test)]
async fn test_models_are_filtered_by_brand_and_search() -> anyhow::Result<()> {
    let ctx = common::setup().await?;
    let toyota = create_brand(&ctx, "Toyota").await?;
    let honda = create_brand(&ctx, "Honda").await?;

    let corolla = create_model(&ctx, toyota, "Corolla").await?;
    assert_eq!(corolla["brandName"], "Toyota");
    create_model(&ctx, toyota, "Yaris").await?;
    create_model(&ctx, honda, "Civic").await?;

    let query = r#"
        query($brandId: Int, $search: String) {
            models(brandId: $brandId, search: $search) { edges { node { name brandName } } totalCount }
        }
    "#;

    let toyota_models = common::execute(&ctx.schema, query, json!({ "brandId": toyota })).await?;
    assert_eq!(toyota_models["models"]["totalCount"], 2);
    assert_eq!(toyota_models["models"]["edges"][1]["node"]["name"], "Yaris");

    let searched = common::execute(&ctx.schema, query, json!({ "search": "ivi" })).await?;
    assert_eq!(searched["models"]["totalCount"], 1);
    assert_eq!(searched["models"]["edges"][0]["node"]["brandName"], "Honda");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_brand_status_and_listing() -> anyhow::Result<()> {
    let ctx = common::setup().await?;
    let toyota = create_brand(&ctx, "Toyota").await?;
    create_brand(&ctx, "Lada").await?;

    let data = common::execute(
        &ctx.schema,
        "mutation($id: Int!) { updateBrandStatus(id: $id, status: INACTIVE) { status updatedAt } }",
        json!({ "id": toyota }),
    )
    .await?;
    assert_eq!(data["updateBrandStatus"]["status"], "INACTIVE");

    let active = common::execute(
        &ctx.schema,
        "{ brands(status: ACTIVE) { edges { node { name } } totalCount } }",
        json!({}),
    )
    .await?;
    assert_eq!(active["brands"]["totalCount"], 1);
    assert_eq!(active["brands"]["edges"][0]["node"]["name"], "Lada");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_catalog_constraints() -> anyhow::Result<()> {
    let ctx = common::setup().await?;
    let toyota = create_brand(&ctx, "Toyota").await?;
    create_model(&ctx, toyota, "Corolla").await?;

    let duplicate_brand = common::execute_error_code(
        &ctx.schema,
        r#"mutation { createBrand(input: { name: "Toyota" }) { id } }"#,
        json!({}),
    )
    .await?;
    assert_eq!(duplicate_brand, "CONSTRAINT_VIOLATION");

    let duplicate_model = common::execute_error_code(
        &ctx.schema,
        r#"mutation($brandId: Int!) { createModel(input: { brandId: $brandId, name: "Corolla" }) { id } }"#,
        json!({ "brandId": toyota }),
    )
    .await?;
    assert_eq!(duplicate_model, "CONSTRAINT_VIOLATION");

    let referenced_brand = common::execute_error_code(
        &ctx.schema,
        "mutation($id: Int!) { deleteBrand(id: $id) { id } }",
        json!({ "id": toyota }),
    )
    .await?;
    assert_eq!(referenced_brand, "CONSTRAINT_VIOLATION");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_model_keeps_blank_name() -> anyhow::Result<()> {
    let ctx = common::setup().await?;
    let toyota = create_brand(&ctx, "Toyota").await?;
    let model = create_model(&ctx, toyota, "Corolla").await?;

    let data = common::execute(
        &ctx.schema,
        r#"mutation($id: Int!) { updateModel(id: $id, input: { name: "", status: INACTIVE }) { name status } }"#,
        json!({ "id": model["id"] }),
    )
    .await?;
    assert_eq!(data["updateModel"]["name"], "Corolla");
    assert_eq!(data["updateModel"]["status"], "INACTIVE");

    let deleted = common::execute(
        &ctx.schema,
        "mutation($id: Int!) { deleteModel(id: $id) { name brandName } }",
        json!({ "id": model["id"] }),
    )
    .await?;
    assert_eq!(deleted["deleteModel"]["brandName"], "Toyota");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_model_status_and_referenced_model() -> anyhow::Result<()> {
    let ctx = common::setup().await?;
    let catalog = common::seed_catalog(&ctx.db).await?;
    common::seed_vehicle(&ctx.db, &catalog, "Corolla 1.6", 2019, 12_500.0).await?;

    let data = common::execute(
        &ctx.schema,
        "mutation($id: Int!) { updateModelStatus(id: $id, status: INACTIVE) { name status brandName } }",
        json!({ "id": catalog.model_id }),
    )
    .await?;
    assert_eq!(data["updateModelStatus"]["status"], "INACTIVE");
    assert_eq!(data["updateModelStatus"]["brandName"], "Toyota");

    let missing = common::execute_error_code(
        &ctx.schema,
        "mutation { updateModelStatus(id: 999, status: ACTIVE) { id } }",
        json!({}),
    )
    .await?;
    assert_eq!(missing, "NOT_FOUND");

    let referenced = common::execute_error_code(
        &ctx.schema,
        "mutation($id: Int!) { deleteModel(id: $id) { id } }",
        json!({ "id": catalog.model_id }),
    )
    .await?;
    assert_eq!(referenced, "CONSTRAINT_VIOLATION");

    let kept = common::execute(
        &ctx.schema,
        "query($id: Int!) { model(id: $id) { status } }",
        json!({ "id": catalog.model_id }),
    )
    .await?;
    assert_eq!(kept["model"]["status"], "INACTIVE");

    Ok(())
}
