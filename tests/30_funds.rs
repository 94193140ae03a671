mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn summary_is_disbursed_minus_spent() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "Jalan Desa" })).await?;
    let id = project["project_id"].as_i64().unwrap_or_default();

    let (status, disbursement) = server
        .post_json(
            &format!("/api/projects/{}/disbursements", id),
            &token,
            json!({
                "amount": 100,
                "date_received": "2024-02-01",
                "phase": "Tahap 1",
                "source_of_fund": "Dana Desa"
            }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(disbursement["amount"].as_f64(), Some(100.0));
    assert_eq!(disbursement["project_id"], id);

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/expenses", id),
            &token,
            json!({ "description": "Semen", "amount_spent": 40, "date_spent": "2024-02-10" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, summary) = server.get_json("/api/funds").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalDisbursed"].as_f64(), Some(100.0));
    assert_eq!(summary["totalSpent"].as_f64(), Some(40.0));
    assert_eq!(summary["remaining"].as_f64(), Some(60.0));
    Ok(())
}

#[tokio::test]
async fn summary_is_exact_for_fractional_amounts() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "Jalan" })).await?;
    let path = format!("/api/projects/{}/disbursements", project["project_id"]);

    for amount in ["0.1", "0.2"] {
        let (status, _) = server
            .post_json(&path, &token, json!({ "amount": amount, "date_received": "2024-01-01" }))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/expenses", project["project_id"]),
            &token,
            json!({ "amount_spent": "0.3", "date_spent": "2024-01-02" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, summary) = server.get_json("/api/funds").await?;
    assert_eq!(summary["totalDisbursed"].as_f64(), Some(0.3));
    assert_eq!(summary["remaining"].as_f64(), Some(0.0));
    Ok(())
}

#[tokio::test]
async fn summary_wire_text_keeps_cents() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "Jembatan" })).await?;
    let id = project["project_id"].as_i64().unwrap_or_default();

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/disbursements", id),
            &token,
            json!({ "amount": "1250000.10", "date_received": "2024-04-01" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/expenses", id),
            &token,
            json!({ "amount_spent": "0.05", "date_spent": "2024-04-02" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let text = server.client.get(server.url("/api/funds")).send().await?.text().await?;
    for field in [
        r#""totalDisbursed":1250000.10"#,
        r#""totalSpent":0.05"#,
        r#""remaining":1250000.05"#,
    ] {
        assert!(text.contains(field), "{} missing from {}", field, text);
    }
    Ok(())
}

#[tokio::test]
async fn amounts_outside_the_money_column_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "Drainase" })).await?;
    let id = project["project_id"].as_i64().unwrap_or_default();

    for amount in [json!("0.004"), json!("123456789012345678"), json!(1e13)] {
        let (status, body) = server
            .post_json(
                &format!("/api/projects/{}/disbursements", id),
                &token,
                json!({ "amount": amount, "date_received": "2024-01-01" }),
            )
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "amount {}", amount);
        assert!(body["field_errors"]["amount"].is_string());
    }

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/expenses", id),
            &token,
            json!({ "amount_spent": "10.125", "date_spent": "2024-01-02" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = server
        .post_json(
            "/api/projects",
            &token,
            json!({ "title": "Balai", "estimated_budget": "1000000000000" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["estimated_budget"].is_string());

    // Trailing zeros beyond the cents are not extra precision
    let (status, disbursement) = server
        .post_json(
            &format!("/api/projects/{}/disbursements", id),
            &token,
            json!({ "amount": "999999999999.990", "date_received": "2024-01-03" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(disbursement["amount"].as_f64(), Some(999_999_999_999.99));

    let (_, summary) = server.get_json("/api/funds").await?;
    assert_eq!(summary["totalDisbursed"].as_f64(), Some(999_999_999_999.99));
    Ok(())
}

#[tokio::test]
async fn empty_ledger_summarizes_to_zero() -> Result<()> {
    let server = common::spawn_server().await?;
    let (status, summary) = server.get_json("/api/funds").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalDisbursed"].as_f64(), Some(0.0));
    assert_eq!(summary["totalSpent"].as_f64(), Some(0.0));
    assert_eq!(summary["remaining"].as_f64(), Some(0.0));
    Ok(())
}

#[tokio::test]
async fn disbursements_are_listed_newest_first_per_project_and_overall() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let a = server.create_project(&token, json!({ "title": "A" })).await?;
    let b = server.create_project(&token, json!({ "title": "B" })).await?;

    for (project, date) in [(&a, "2024-01-05"), (&a, "2024-03-05"), (&b, "2024-02-05")] {
        let (status, _) = server
            .post_json(
                &format!("/api/projects/{}/disbursements", project["project_id"]),
                &token,
                json!({ "amount": 10, "date_received": date }),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, for_a) = server
        .get_json(&format!("/api/projects/{}/disbursements", a["project_id"]))
        .await?;
    let dates: Vec<&str> = for_a
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["date_received"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(dates, vec!["2024-03-05", "2024-01-05"]);

    let (_, all) = server.get_json("/api/funds/distribution").await?;
    let dates: Vec<&str> = all
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["date_received"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(dates, vec!["2024-03-05", "2024-02-05", "2024-01-05"]);
    Ok(())
}

#[tokio::test]
async fn expenses_are_listed_per_project() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "A" })).await?;
    let path = format!("/api/projects/{}/expenses", project["project_id"]);

    for (amount, date) in [(5, "2024-01-01"), (7, "2024-01-09")] {
        server
            .post_json(&path, &token, json!({ "amount_spent": amount, "date_spent": date }))
            .await?;
    }

    let (status, expenses) = server.get_json(&path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(expenses[0]["amount_spent"].as_f64(), Some(7.0));
    assert_eq!(expenses[1]["amount_spent"].as_f64(), Some(5.0));
    Ok(())
}

#[tokio::test]
async fn amounts_must_be_positive() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let project = server.create_project(&token, json!({ "title": "A" })).await?;

    let (status, body) = server
        .post_json(
            &format!("/api/projects/{}/disbursements", project["project_id"]),
            &token,
            json!({ "amount": 0, "date_received": "2024-01-01" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["amount"], "must be greater than zero");

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/expenses", project["project_id"]),
            &token,
            json!({ "amount_spent": -3, "date_spent": "2024-01-01" }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn disbursement_for_missing_project_fails_in_the_store() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    let (status, body) = server
        .post_json(
            "/api/projects/424242/disbursements",
            &token,
            json!({ "amount": 10, "date_received": "2024-01-01" }),
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["error"].as_str().unwrap_or_default().contains("foreign key"),
        "unexpected body: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn progress_and_feedback_record_the_caller() -> Result<()> {
    let server = common::spawn_server().await?;
    let (token, user) = server.register("Siti", "siti@desa.id", "official").await?;
    let project = server.create_project(&token, json!({ "title": "Jalan" })).await?;
    let id = project["project_id"].as_i64().unwrap_or_default();

    let (status, progress) = server
        .post_json(
            &format!("/api/projects/{}/progress", id),
            &token,
            json!({ "notes": "Pondasi selesai", "completion_percentage": 40 }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(progress["completion_percentage"], 40);
    assert_eq!(progress["created_by"], user["user_id"]);

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/progress", id),
            &token,
            json!({ "completion_percentage": 101 }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, feedback) = server
        .post_json(
            &format!("/api/projects/{}/feedback", id),
            &token,
            json!({ "comment_text": "Terima kasih" }),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(feedback["comment_text"], "Terima kasih");
    assert_eq!(feedback["created_by"], user["user_id"]);

    let (status, _) = server
        .post_json(
            &format!("/api/projects/{}/feedback", id),
            &token,
            json!({ "comment_text": "   " }),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
