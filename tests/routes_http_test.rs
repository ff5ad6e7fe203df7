// ABOUTME: HTTP integration tests driving the full router in-process
// ABOUTME: Covers login, the admin gate, public submissions, content CRUD and the activity trail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::too_many_lines)]

mod common;
mod helpers;

use axum::Router;
use common::{create_test_app_with_admin, ADMIN_PASSWORD, ADMIN_USERNAME};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn login(app: &Router) -> String {
    let response = AxumTestRequest::post("/api/auth/login")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "integration-test")
        .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["username"], ADMIN_USERNAME);
    assert!(body["expires_at"].is_string());
    body["token"].as_str().unwrap().to_owned()
}

fn job_payload(title: &str, is_active: bool) -> Value {
    json!({
        "title": title,
        "department": "Engineering",
        "location": "Remote",
        "type": "Full-time",
        "description": "Defend customer infrastructure.",
        "requirements": ["Rust", "Incident response"],
        "is_active": is_active,
    })
}

// ============================================================================
// Health and cross-cutting layers
// ============================================================================

#[tokio::test]
async fn test_health_carries_request_id_and_security_headers() {
    let (app, _) = create_test_app_with_admin().await.unwrap();

    let response = AxumTestRequest::get("/api/health").send(app.clone()).await;
    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());
    assert_eq!(response.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(response.header("x-frame-options"), Some("DENY"));
    assert!(response.header("strict-transport-security").is_none());
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");

    let response = AxumTestRequest::get("/ready").send(app).await;
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Admin gate
// ============================================================================

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = create_test_app_with_admin().await.unwrap();

    let mut bodies = Vec::new();
    for credentials in [
        json!({ "username": ADMIN_USERNAME, "password": "wrong" }),
        json!({ "username": "ghost", "password": ADMIN_PASSWORD }),
        json!({ "username": format!("  {ADMIN_USERNAME}  "), "password": ADMIN_PASSWORD }),
        json!({ "username": "", "password": "" }),
        json!({}),
    ] {
        let response = AxumTestRequest::post("/api/auth/login")
            .json(&credentials)
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 401);
        bodies.push(response.json::<Value>());
    }

    assert!(bodies.iter().all(|body| body == &bodies[0]));
    assert_eq!(bodies[0]["error"]["message"], "Invalid credentials");
    assert_eq!(bodies[0]["error"]["code"], "AUTH_INVALID");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_and_bad_tokens() {
    let (app, resources) = create_test_app_with_admin().await.unwrap();

    let protected = [
        "/api/auth/verify",
        "/api/jobs/all",
        "/api/applications",
        "/api/contact",
        "/api/activity-logs",
        "/api/activity-logs/stats",
    ];

    let foreign = shield_site_server::auth::AuthManager::new("a-different-secret-of-enough-length", 24)
        .issue_token(ADMIN_USERNAME)
        .unwrap()
        .token;
    let expired = resources
        .auth_manager
        .issue_token_at(ADMIN_USERNAME, chrono::Utc::now() - chrono::Duration::days(3))
        .unwrap()
        .token;

    for path in protected {
        let response = AxumTestRequest::get(path).send(app.clone()).await;
        assert_eq!(response.status(), 401, "{path} without a token");

        let response = AxumTestRequest::get(path)
            .header("authorization", "Basic YWRtaW46YWRtaW4=")
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 401, "{path} with a non-bearer header");

        for token in [foreign.as_str(), expired.as_str(), "not-a-jwt"] {
            let response = AxumTestRequest::get(path).bearer(token).send(app.clone()).await;
            assert_eq!(response.status(), 401, "{path} with a rejected token");
            let body: Value = response.json();
            assert_eq!(body["error"]["message"], "Unauthorized");
        }
    }

    let token = login(&app).await;
    let response = AxumTestRequest::get("/api/auth/verify")
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["valid"], true);
    assert_eq!(body["username"], ADMIN_USERNAME);
}

// ============================================================================
// Jobs and applications
// ============================================================================

#[tokio::test]
async fn test_job_lifecycle_and_public_visibility() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    let response = AxumTestRequest::post("/api/jobs")
        .json(&job_payload("Security Engineer", true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 401, "creating a job requires a session");

    let response = AxumTestRequest::post("/api/jobs")
        .bearer(&token)
        .json(&job_payload("Security Engineer", true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let active: Value = response.json();
    assert_eq!(active["type"], "Full-time");
    assert_eq!(active["requirements"], json!(["Rust", "Incident response"]));

    let response = AxumTestRequest::post("/api/jobs")
        .bearer(&token)
        .json(&job_payload("Internal Auditor", false))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let hidden: Value = response.json();
    let hidden_id = hidden["id"].as_i64().unwrap();

    let public: Vec<Value> = AxumTestRequest::get("/api/jobs").send(app.clone()).await.json();
    assert_eq!(public.len(), 1);
    assert_eq!(public[0]["title"], "Security Engineer");

    let response = AxumTestRequest::get(&format!("/api/jobs/{hidden_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let all: Vec<Value> = AxumTestRequest::get("/api/jobs/all")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(all.len(), 2);

    let response = AxumTestRequest::put(&format!("/api/jobs/{hidden_id}"))
        .bearer(&token)
        .json(&job_payload("Internal Auditor", true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let response = AxumTestRequest::get(&format!("/api/jobs/{hidden_id}"))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::put("/api/jobs/9999")
        .bearer(&token)
        .json(&job_payload("Ghost", true))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let mut blank = job_payload("", true);
    blank["title"] = json!("   ");
    let response = AxumTestRequest::post("/api/jobs")
        .bearer(&token)
        .json(&blank)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::delete(&format!("/api/jobs/{hidden_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Job deleted successfully");

    let response = AxumTestRequest::delete(&format!("/api/jobs/{hidden_id}"))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_application_submission_and_review() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    let job: Value = AxumTestRequest::post("/api/jobs")
        .bearer(&token)
        .json(&job_payload("SOC Analyst", true))
        .send(app.clone())
        .await
        .json();
    let job_id = job["id"].as_i64().unwrap();

    let response = AxumTestRequest::post("/api/applications")
        .json(&json!({
            "job_id": job_id,
            "name": "Ada Lovelace",
            "email": "ada@analytical.engine",
            "cover_letter": "I like <b>bold</b> moves",
            "years_experience": 7,
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Application submitted successfully");
    let application_id = body["id"].as_i64().unwrap();

    let response = AxumTestRequest::post("/api/applications")
        .json(&json!({ "name": "No Email" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let listed: Vec<Value> = AxumTestRequest::get("/api/applications")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["job_title"], "SOC Analyst");
    assert_eq!(listed[0]["status"], "new");

    let response = AxumTestRequest::patch(&format!("/api/applications/{application_id}/status"))
        .bearer(&token)
        .json(&json!({ "status": "interview" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let updated: Value = response.json();
    assert_eq!(updated["status"], "interview");

    let response = AxumTestRequest::patch(&format!("/api/applications/{application_id}/status"))
        .bearer(&token)
        .json(&json!({ "status": "ghosted" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::delete(&format!("/api/applications/{application_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get(&format!("/api/applications/{application_id}"))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);
}

// ============================================================================
// Contact form
// ============================================================================

#[tokio::test]
async fn test_contact_form_validation_and_inbox() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    let response = AxumTestRequest::post("/api/contact")
        .json(&json!({
            "name": "J",
            "email": "jane@gmail.com",
            "company": "Acme",
            "phone": "call me maybe",
            "subject": "Hi",
            "message": "short",
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|detail| detail["field"].as_str())
        .collect();
    for field in ["name", "email", "phone", "subject", "message"] {
        assert!(fields.contains(&field), "{field} should be reported");
    }

    let response = AxumTestRequest::post("/api/contact")
        .json(&json!({
            "name": "Jane Doe",
            "email": "jane@acme-security.com",
            "company": "Acme Security",
            "phone": "+1 (555) 010-0100",
            "subject": "Pen test quote",
            "message": "Please scope a <script>alert(1)</script> review.",
        }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Message sent successfully");
    let contact_id = body["id"].as_i64().unwrap();

    let response = AxumTestRequest::get("/api/contact").send(app.clone()).await;
    assert_eq!(response.status(), 401);

    let inbox: Vec<Value> = AxumTestRequest::get("/api/contact")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(inbox.len(), 1);
    let stored = inbox[0]["message"].as_str().unwrap();
    assert!(!stored.contains("<script>"));
    assert!(stored.contains("&lt;script&gt;"));
    assert_eq!(inbox[0]["status"], "new");

    let response = AxumTestRequest::patch(&format!("/api/contact/{contact_id}/status"))
        .bearer(&token)
        .json(&json!({ "status": "replied" }))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::delete(&format!("/api/contact/{contact_id}"))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Services and documentation
// ============================================================================

#[tokio::test]
async fn test_services_catalog() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    for (title, category, order) in [
        ("Cloud Security", "consulting", 2),
        ("Threat Modeling", "consulting", 1),
        ("Healthcare", "industry", 1),
    ] {
        let response = AxumTestRequest::post("/api/services")
            .bearer(&token)
            .json(&json!({
                "category": category,
                "title": title,
                "description": format!("{title} services"),
                "features": ["Assessment", "Roadmap"],
                "highlights": [],
                "display_order": order,
            }))
            .send(app.clone())
            .await;
        assert_eq!(response.status(), 201);
    }

    let consulting: Vec<Value> = AxumTestRequest::get("/api/services?category=consulting")
        .send(app.clone())
        .await
        .json();
    let titles: Vec<&str> = consulting.iter().filter_map(|s| s["title"].as_str()).collect();
    assert_eq!(titles, vec!["Threat Modeling", "Cloud Security"]);
    assert!(consulting[0]["highlights"].is_null());

    let all: Vec<Value> = AxumTestRequest::get("/api/services").send(app.clone()).await.json();
    assert_eq!(all.len(), 3);

    let response = AxumTestRequest::get("/api/services?category=snacks")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let response = AxumTestRequest::post("/api/services")
        .json(&json!({ "category": "platform", "title": "x", "description": "y" }))
        .send(app)
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_documentation_by_slug_and_id() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    let entry = json!({
        "title": "Zero Trust Security Architecture",
        "slug": "zero-trust-security",
        "file_path": "/resources/documentation/zero-trust-security.html",
        "display_order": 3,
    });

    let response = AxumTestRequest::post("/api/documentation")
        .bearer(&token)
        .json(&entry)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 201);
    let created: Value = response.json();
    let doc_id = created["id"].as_i64().unwrap();
    assert_eq!(created["category"], "learning-center");

    let response = AxumTestRequest::post("/api/documentation")
        .bearer(&token)
        .json(&entry)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 409);

    let response = AxumTestRequest::get("/api/documentation/zero-trust-security")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], doc_id);

    let listed: Vec<Value> = AxumTestRequest::get("/api/documentation?category=learning-center")
        .send(app.clone())
        .await
        .json();
    assert_eq!(listed.len(), 1);

    let mut hidden = entry.clone();
    hidden["is_active"] = json!(false);
    let response = AxumTestRequest::put(&format!("/api/documentation/{doc_id}"))
        .bearer(&token)
        .json(&hidden)
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 200);

    let response = AxumTestRequest::get("/api/documentation/zero-trust-security")
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 404);

    let response = AxumTestRequest::delete(&format!("/api/documentation/{doc_id}"))
        .bearer(&token)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Activity trail
// ============================================================================

#[tokio::test]
async fn test_admin_actions_are_recorded() {
    let (app, _) = create_test_app_with_admin().await.unwrap();
    let token = login(&app).await;

    let job: Value = AxumTestRequest::post("/api/jobs")
        .bearer(&token)
        .json(&job_payload("Red Team Lead", true))
        .send(app.clone())
        .await
        .json();
    let job_id = job["id"].as_i64().unwrap();

    AxumTestRequest::delete(&format!("/api/jobs/{job_id}"))
        .bearer(&token)
        .send(app.clone())
        .await;

    // Public submissions are not admin activity
    AxumTestRequest::post("/api/applications")
        .json(&json!({ "name": "Applicant", "email": "a@b.example" }))
        .send(app.clone())
        .await;

    let page: Value = AxumTestRequest::get("/api/activity-logs")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["page"], 1);
    assert_eq!(page["pagination"]["limit"], 50);
    assert_eq!(page["pagination"]["totalPages"], 1);

    let logins: Value = AxumTestRequest::get("/api/activity-logs?action_type=login")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    let entries = logins["logs"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["admin_username"], ADMIN_USERNAME);
    assert_eq!(entries[0]["ip_address"], "203.0.113.7");
    assert_eq!(entries[0]["user_agent"], "integration-test");
    assert!(entries[0]["admin_id"].is_i64());

    let job_entries: Value = AxumTestRequest::get("/api/activity-logs?resource_type=job&limit=1&page=2")
        .bearer(&token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(job_entries["pagination"]["total"], 2);
    assert_eq!(job_entries["pagination"]["totalPages"], 2);
    assert_eq!(job_entries["logs"].as_array().unwrap().len(), 1);

    let stats: Vec<Value> = AxumTestRequest::get("/api/activity-logs/stats")
        .bearer(&token)
        .send(app)
        .await
        .json();
    let counted: i64 = stats.iter().filter_map(|s| s["count"].as_i64()).sum();
    assert_eq!(counted, 3);
}
