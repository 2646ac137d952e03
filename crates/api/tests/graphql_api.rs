mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{mint_jwt, TestServer, JWT_SECRET};

async fn graphql(client: &reqwest::Client, srv: &TestServer, token: &str, query: &str) -> Value {
    let res = client
        .post(srv.url("/graphql"))
        .bearer_auth(token)
        .json(&json!({ "query": query }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn graphql_product_lifecycle() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET);
    let client = reqwest::Client::new();

    let created = graphql(
        &client,
        &srv,
        &token,
        r#"mutation { createProduct(name: "Widget", description: "A widget", price: 9.99) { id name price } }"#,
    )
    .await;
    assert!(created.get("errors").is_none(), "{created}");
    let id = created["data"]["createProduct"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["createProduct"]["price"], 9.99);

    let updated = graphql(
        &client,
        &srv,
        &token,
        &format!(r#"mutation {{ updateProduct(id: "{id}", price: 12.5) {{ name description price }} }}"#),
    )
    .await;
    assert_eq!(
        updated["data"]["updateProduct"],
        json!({ "name": "Widget", "description": "A widget", "price": 12.5 })
    );

    let deleted = graphql(
        &client,
        &srv,
        &token,
        &format!(r#"mutation {{ deleteProduct(id: "{id}") {{ id }} }}"#),
    )
    .await;
    assert_eq!(deleted["data"]["deleteProduct"]["id"], id.as_str());

    let fetched = graphql(&client, &srv, &token, &format!(r#"{{ product(id: "{id}") {{ id }} }}"#)).await;
    assert!(fetched.get("errors").is_none(), "{fetched}");
    assert_eq!(fetched["data"]["product"], Value::Null);
}

#[tokio::test]
async fn graphql_and_rest_share_one_store() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET);
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .bearer_auth(&token)
        .json(&json!({ "name": "Gadget", "price": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let listing = graphql(&client, &srv, &token, "{ products { name } productsByName(name: \"adg\") { name } }").await;
    assert_eq!(
        listing["data"],
        json!({ "products": [{ "name": "Gadget" }], "productsByName": [{ "name": "Gadget" }] })
    );
}

#[tokio::test]
async fn graphql_errors_carry_codes() {
    let srv = TestServer::spawn().await;
    let token = mint_jwt(JWT_SECRET);
    let client = reqwest::Client::new();

    let bad_date = graphql(&client, &srv, &token, r#"{ productsByDate(date: "yesterday") { id } }"#).await;
    assert_eq!(bad_date["errors"][0]["extensions"]["code"], "INVALID_DATE");

    let bad_price = graphql(
        &client,
        &srv,
        &token,
        r#"mutation { createProduct(name: "Widget", price: -1) { id } }"#,
    )
    .await;
    assert_eq!(bad_price["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");
}
