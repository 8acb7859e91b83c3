//! Integration tests for roles and permissions

mod common;

use serde_json::json;

const CREATE_ROLE: &str = r#"
    mutation($input: CreateRoleInput!) {
        createRole(input: $input) { id name ability abilities permissions { id name subjects } }
    }
"#;

#[test_log::test(tokio::test)]
async fn test_create_role_with_permissions() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    let data = common::execute(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": {
            "name": "catalog-manager",
            "abilities": ["CREATE", "READ", "UPDATE"],
            "permissions": [
                { "name": "catalog", "subjects": ["brand", " model ", ""] },
                { "name": "listings", "subjects": ["vehicle"] },
            ],
        }}),
    )
    .await?;

    let role = &data["createRole"];
    assert_eq!(role["ability"], "create,read,update");
    assert_eq!(role["abilities"], json!(["CREATE", "READ", "UPDATE"]));
    assert_eq!(role["permissions"][0]["subjects"], json!(["brand", "model"]));
    assert_eq!(role["permissions"][1]["name"], "listings");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_set_role_permissions_replaces_the_set() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    let created = common::execute(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": {
            "name": "support",
            "abilities": ["READ"],
            "permissions": [{ "name": "chat", "subjects": ["message"] }],
        }}),
    )
    .await?;
    let role_id = created["createRole"]["id"].clone();

    let replaced = common::execute(
        &ctx.schema,
        r#"mutation($roleId: Int!) {
            setRolePermissions(roleId: $roleId, permissions: [
                { name: "customers", subjects: ["customer"] },
                { name: "vendors", subjects: ["vendor", "organization"] }
            ]) { permissions { name subjects } }
        }"#,
        json!({ "roleId": role_id }),
    )
    .await?;
    let permissions = &replaced["setRolePermissions"]["permissions"];
    assert_eq!(permissions.as_array().map(Vec::len), Some(2));
    assert_eq!(permissions[1]["subjects"], json!(["vendor", "organization"]));

    let listed = common::execute(
        &ctx.schema,
        "query($roleId: Int) { permissions(roleId: $roleId) { edges { node { name } } totalCount } }",
        json!({ "roleId": role_id }),
    )
    .await?;
    assert_eq!(listed["permissions"]["totalCount"], 2);
    assert_eq!(listed["permissions"]["edges"][0]["node"]["name"], "customers");

    let missing_role = common::execute_error_code(
        &ctx.schema,
        r#"mutation { setRolePermissions(roleId: 999, permissions: []) { id } }"#,
        json!({}),
    )
    .await?;
    assert_eq!(missing_role, "NOT_FOUND");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_roles_listing_loads_permissions_per_role() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    for (name, permission) in [("admin", "everything"), ("auditor", "reports")] {
        common::execute(
            &ctx.schema,
            CREATE_ROLE,
            json!({ "input": {
                "name": name,
                "abilities": ["MANAGE"],
                "permissions": [{ "name": permission, "subjects": ["all"] }],
            }}),
        )
        .await?;
    }

    let data = common::execute(
        &ctx.schema,
        "{ roles { edges { node { name permissions { name } } } totalCount } }",
        json!({}),
    )
    .await?;
    assert_eq!(data["roles"]["totalCount"], 2);
    assert_eq!(data["roles"]["edges"][0]["node"]["permissions"][0]["name"], "everything");
    assert_eq!(data["roles"]["edges"][1]["node"]["permissions"][0]["name"], "reports");

    let searched = common::execute(
        &ctx.schema,
        r#"{ roles(search: "audit") { edges { node { name } } } }"#,
        json!({}),
    )
    .await?;
    assert_eq!(searched["roles"]["edges"][0]["node"]["name"], "auditor");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_update_and_delete_role() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    let created = common::execute(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": {
            "name": "viewer",
            "abilities": ["READ"],
            "permissions": [{ "name": "listings", "subjects": ["vehicle"] }],
        }}),
    )
    .await?;
    let role_id = created["createRole"]["id"].clone();
    let permission_id = created["createRole"]["permissions"][0]["id"].clone();

    let updated = common::execute(
        &ctx.schema,
        r#"mutation($id: Int!) { updateRole(id: $id, input: { name: "reader", abilities: [] }) { name abilities } }"#,
        json!({ "id": role_id }),
    )
    .await?;
    assert_eq!(updated["updateRole"]["name"], "reader");
    assert_eq!(updated["updateRole"]["abilities"], json!(["READ"]));

    let deleted = common::execute(
        &ctx.schema,
        "mutation($id: Int!) { deleteRole(id: $id) { name permissions { name } } }",
        json!({ "id": role_id }),
    )
    .await?;
    assert_eq!(deleted["deleteRole"]["permissions"][0]["name"], "listings");

    let permission = common::execute(
        &ctx.schema,
        "query($id: Int!) { permission(id: $id) { id } }",
        json!({ "id": permission_id }),
    )
    .await?;
    assert!(permission["permission"].is_null());

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_permission_crud() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    let created = common::execute(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": { "name": "ops", "abilities": ["READ"] } }),
    )
    .await?;
    let role_id = created["createRole"]["id"].clone();
    assert_eq!(created["createRole"]["permissions"], json!([]));

    let permission = common::execute(
        &ctx.schema,
        r#"mutation($roleId: Int!) {
            createPermission(input: { roleId: $roleId, name: "fleet", subjects: ["vehicle"] }) { id roleId }
        }"#,
        json!({ "roleId": role_id }),
    )
    .await?;
    let permission_id = permission["createPermission"]["id"].clone();
    assert_eq!(permission["createPermission"]["roleId"], role_id);

    let updated = common::execute(
        &ctx.schema,
        r#"mutation($id: Int!) {
            updatePermission(id: $id, input: { subjects: ["vehicle", "brand"] }) { name subjects }
        }"#,
        json!({ "id": permission_id }),
    )
    .await?;
    assert_eq!(updated["updatePermission"]["name"], "fleet");
    assert_eq!(updated["updatePermission"]["subjects"], json!(["vehicle", "brand"]));

    let orphan = common::execute_error_code(
        &ctx.schema,
        r#"mutation { createPermission(input: { roleId: 999, name: "ghost", subjects: [] }) { id } }"#,
        json!({}),
    )
    .await?;
    assert_eq!(orphan, "NOT_FOUND");

    let deleted = common::execute(
        &ctx.schema,
        "mutation($id: Int!) { deletePermission(id: $id) { name } }",
        json!({ "id": permission_id }),
    )
    .await?;
    assert_eq!(deleted["deletePermission"]["name"], "fleet");

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_subjects_containing_commas_are_rejected() -> anyhow::Result<()> {
    let ctx = common::setup().await?;

    let on_create_role = common::execute_error_code(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": {
            "name": "fleet",
            "abilities": ["READ"],
            "permissions": [{ "name": "catalog", "subjects": ["vehicle,brand"] }],
        }}),
    )
    .await?;
    assert_eq!(on_create_role, "VALIDATION_FAILED");

    let created = common::execute(
        &ctx.schema,
        CREATE_ROLE,
        json!({ "input": { "name": "fleet", "abilities": ["READ"] } }),
    )
    .await?;
    let role_id = created["createRole"]["id"].clone();

    let on_create = common::execute_error_code(
        &ctx.schema,
        r#"mutation($roleId: Int!) {
            createPermission(input: { roleId: $roleId, name: "catalog", subjects: ["vehicle,brand"] }) { id }
        }"#,
        json!({ "roleId": role_id }),
    )
    .await?;
    assert_eq!(on_create, "VALIDATION_FAILED");

    let permission = common::execute(
        &ctx.schema,
        r#"mutation($roleId: Int!) {
            createPermission(input: { roleId: $roleId, name: "catalog", subjects: ["vehicle"] }) { id }
        }"#,
        json!({ "roleId": role_id }),
    )
    .await?;

    let on_update = common::execute_error_code(
        &ctx.schema,
        r#"mutation($id: Int!) {
            updatePermission(id: $id, input: { subjects: ["brand,model"] }) { id }
        }"#,
        json!({ "id": permission["createPermission"]["id"] }),
    )
    .await?;
    assert_eq!(on_update, "VALIDATION_FAILED");

    let on_replace = common::execute_error_code(
        &ctx.schema,
        r#"mutation($roleId: Int!) {
            setRolePermissions(roleId: $roleId, permissions: [{ name: "all", subjects: ["a,b"] }]) { id }
        }"#,
        json!({ "roleId": role_id }),
    )
    .await?;
    assert_eq!(on_replace, "VALIDATION_FAILED");

    let kept = common::execute(
        &ctx.schema,
        "query($roleId: Int) { permissions(roleId: $roleId) { edges { node { subjects } } } }",
        json!({ "roleId": role_id }),
    )
    .await?;
    assert_eq!(kept["permissions"]["edges"][0]["node"]["subjects"], json!(["vehicle"]));

    Ok(())
}
