mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn metrics_bucket_by_month_and_drop_orphan_expenses() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let this_month = chrono::Utc::now().format("%Y-%m").to_string();
    let today = chrono::Utc::now().date_naive().to_string();

    let a = server
        .create_project(&token, json!({ "title": "A", "estimated_budget": 1000 }))
        .await?;
    server
        .create_project(&token, json!({ "title": "B", "estimated_budget": 500 }))
        .await?;

    let expenses = format!("/api/projects/{}/expenses", a["project_id"]);
    server
        .post_json(&expenses, &token, json!({ "amount_spent": 40, "date_spent": today }))
        .await?;
    // No project was created in 2001, so this one is not counted anywhere
    server
        .post_json(&expenses, &token, json!({ "amount_spent": 99, "date_spent": "2001-01-15" }))
        .await?;

    let (status, metrics) = server.get_json("/api/metrics/projects-by-month").await?;
    assert_eq!(status, StatusCode::OK);

    let buckets = metrics.as_object().cloned().unwrap_or_default();
    assert_eq!(buckets.len(), 1, "unexpected buckets: {}", metrics);
    assert!(!buckets.contains_key("2001-01"));

    let bucket = &metrics[&this_month];
    assert_eq!(bucket["projects"], 2);
    assert_eq!(bucket["fundsIn"].as_f64(), Some(1500.0));
    assert_eq!(bucket["fundsOut"].as_f64(), Some(40.0));
    Ok(())
}

#[tokio::test]
async fn metrics_are_empty_without_projects() -> Result<()> {
    let server = common::spawn_server().await?;
    let (status, metrics) = server.get_json("/api/metrics/projects-by-month").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics, json!({}));
    Ok(())
}
