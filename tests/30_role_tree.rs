mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

struct Fixture {
    org_id: i64,
    role_ids: Vec<i64>,
}

async fn setup(server: &common::TestServer, roles: &[&str]) -> Result<Fixture> {
    let client = reqwest::Client::new();
    let company_id = common::seed_company(&format!("it_tree_{}", Uuid::new_v4().simple())).await?;

    let res = client
        .post(format!("{}/api/organizations", server.base_url))
        .json(&json!({ "company_id": company_id, "name": "Main" }))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let org_id = body["organization"]["id"].as_i64().expect("org id");

    let mut role_ids = Vec::new();
    for name in roles {
        let res = client
            .post(format!("{}/api/roles", server.base_url))
            .json(&json!({ "company_id": company_id, "name": name }))
            .send()
            .await?;
        let body = res.json::<serde_json::Value>().await?;
        role_ids.push(body["role"]["id"].as_i64().expect("role id"));
    }

    Ok(Fixture { org_id, role_ids })
}

#[tokio::test]
async fn save_assigns_fresh_ids_and_remaps_parents() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        eprintln!("skipping save_assigns_fresh_ids_and_remaps_parents: no database");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let fx = setup(server, &["CEO", "CTO", "Engineer"]).await?;
    let (ceo, cto, eng) = (fx.role_ids[0], fx.role_ids[1], fx.role_ids[2]);

    // CEO -> CTO -> Engineer
    let payload = json!({ "nodes": [
        { "role_id": ceo, "parent_index": null, "sort_order": 0, "depth_level": 0 },
        { "role_id": cto, "parent_index": 0, "sort_order": 0, "depth_level": 1 },
        { "role_id": eng, "parent_index": 1, "sort_order": 0, "depth_level": 2 },
    ]});
    let res = client
        .post(format!(
            "{}/api/organizations/{}/role-tree",
            server.base_url, fx.org_id
        ))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["saved"], 3);

    let res = client
        .get(format!(
            "{}/api/organizations/{}/role-tree",
            server.base_url, fx.org_id
        ))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    let nodes = body["nodes"].as_array().expect("nodes").clone();
    assert_eq!(nodes.len(), 3);

    // Roots come first in load order; parents are real placement ids.
    let root = &nodes[0];
    assert_eq!(root["role_id"].as_i64(), Some(ceo));
    assert!(root["parent_node_id"].is_null());
    assert_eq!(root["depth_level"], 0);

    let mid = nodes
        .iter()
        .find(|n| n["role_id"].as_i64() == Some(cto))
        .expect("cto node");
    assert_eq!(mid["parent_node_id"], root["id"]);
    assert_eq!(mid["depth_level"], 1);

    let leaf = nodes
        .iter()
        .find(|n| n["role_id"].as_i64() == Some(eng))
        .expect("eng node");
    assert_eq!(leaf["parent_node_id"], mid["id"]);
    assert_eq!(leaf["depth_level"], 2);

    Ok(())
}

#[tokio::test]
async fn save_replaces_prior_placements_wholesale() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        eprintln!("skipping save_replaces_prior_placements_wholesale: no database");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let fx = setup(server, &["A", "B"]).await?;
    let url = format!(
        "{}/api/organizations/{}/role-tree",
        server.base_url, fx.org_id
    );

    let first = json!({ "nodes": [
        { "role_id": fx.role_ids[0], "parent_index": null, "sort_order": 0, "depth_level": 0 },
        { "role_id": fx.role_ids[1], "parent_index": 0, "sort_order": 0, "depth_level": 1 },
    ]});
    client.post(&url).json(&first).send().await?;

    // Second save drops B and keeps only A at the root.
    let second = json!({ "nodes": [
        { "role_id": fx.role_ids[0], "parent_index": null, "sort_order": 0, "depth_level": 0 },
    ]});
    let res = client.post(&url).json(&second).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = client.get(&url).send().await?.json::<serde_json::Value>().await?;
    let nodes = body["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0]["role_id"].as_i64(), Some(fx.role_ids[0]));

    Ok(())
}

#[tokio::test]
async fn save_normalizes_ranks_and_drops_unknown_roles() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        eprintln!("skipping save_normalizes_ranks_and_drops_unknown_roles: no database");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let fx = setup(server, &["A", "B", "C"]).await?;
    let url = format!(
        "{}/api/organizations/{}/role-tree",
        server.base_url, fx.org_id
    );

    // Gappy sort orders, a stale depth, and a role id from nowhere.
    let payload = json!({ "nodes": [
        { "role_id": fx.role_ids[0], "parent_index": null, "sort_order": 4, "depth_level": 2 },
        { "role_id": fx.role_ids[1], "parent_index": 0, "sort_order": 7, "depth_level": 0 },
        { "role_id": fx.role_ids[2], "parent_index": 0, "sort_order": 2, "depth_level": 5 },
        { "role_id": 999_999, "parent_index": null, "sort_order": 0, "depth_level": 0 },
    ]});
    let res = client.post(&url).json(&payload).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["saved"], 3, "unknown role placement must be dropped");

    let body = client.get(&url).send().await?.json::<serde_json::Value>().await?;
    let nodes = body["nodes"].as_array().expect("nodes");
    let root = nodes.iter().find(|n| n["parent_node_id"].is_null()).expect("root");
    assert_eq!(root["sort_order"], 0);
    assert_eq!(root["depth_level"], 0);
    let children: Vec<_> = nodes
        .iter()
        .filter(|n| n["parent_node_id"] == root["id"])
        .collect();
    // C sorts before B: submitted rank 2 beats rank 7
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["role_id"].as_i64(), Some(fx.role_ids[2]));
    assert_eq!(children[0]["sort_order"], 0);
    assert_eq!(children[0]["depth_level"], 1);
    assert_eq!(children[1]["role_id"].as_i64(), Some(fx.role_ids[1]));
    assert_eq!(children[1]["sort_order"], 1);

    Ok(())
}

#[tokio::test]
async fn save_rejects_forward_parent_references() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        eprintln!("skipping save_rejects_forward_parent_references: no database");
        return Ok(());
    }
    let client = reqwest::Client::new();
    let fx = setup(server, &["A", "B"]).await?;

    let payload = json!({ "nodes": [
        { "role_id": fx.role_ids[0], "parent_index": 1, "sort_order": 0, "depth_level": 1 },
        { "role_id": fx.role_ids[1], "parent_index": null, "sort_order": 0, "depth_level": 0 },
    ]});
    let res = client
        .post(format!(
            "{}/api/organizations/{}/role-tree",
            server.base_url, fx.org_id
        ))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "BAD_REQUEST");

    Ok(())
}

#[tokio::test]
async fn saving_to_a_missing_organization_is_404() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_ready(server).await {
        eprintln!("skipping saving_to_a_missing_organization_is_404: no database");
        return Ok(());
    }
    let client = reqwest::Client::new();

    let res = client
        .post(format!(
            "{}/api/organizations/{}/role-tree",
            server.base_url, 0
        ))
        .json(&json!({ "nodes": [] }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
