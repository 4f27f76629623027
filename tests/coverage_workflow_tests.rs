use axum::http::{Method, StatusCode};
use ngo_collab::{
    models::{Compromiso, CoveragePlan, PedidoColaboracion, coverage_plan},
    repositories::PedidoRepository,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;

use test_utils::{commit, create_project, create_request, register_and_login, send, setup_app};

#[tokio::test]
async fn owner_cannot_commit_to_own_request() {
    let (app, db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let request_id = create_request(&app, &owner, project_id, "materiales", 100.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/requests/{}/commit", request_id),
        Some(&owner),
        Some(json!({ "details": "Lo cubrimos nosotros", "amount": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(Compromiso::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn commit_records_pending_commitment() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (collaborator_id, collaborator) = register_and_login(&app, "ONG-B", "secret-b").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let request_id = create_request(&app, &owner, project_id, "dinero", 100.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/requests/{}/commit", request_id),
        Some(&collaborator),
        Some(json!({ "details": "Aportamos 150", "amount": 150.0 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["request_id"], request_id);
    assert_eq!(body["ong_id"], collaborator_id);
    // amounts above the requested amount are accepted
    assert_eq!(body["amount_committed"], 150.0);
}

#[tokio::test]
async fn commit_requires_details_and_amount() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, collaborator) = register_and_login(&app, "ONG-B", "secret-b").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let request_id = create_request(&app, &owner, project_id, "dinero", 100.0).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/requests/{}/commit", request_id),
        Some(&collaborator),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["missing"], json!(["details", "amount"]));
}

#[tokio::test]
async fn covered_requests_are_hidden_and_closed() {
    let (app, db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, collaborator) = register_and_login(&app, "ONG-B", "secret-b").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let open_id = create_request(&app, &owner, project_id, "materiales", 100.0).await;
    let covered_id = create_request(&app, &owner, project_id, "mano de obra", 10.0).await;

    let repo = PedidoRepository::new(&db);
    let pedido = repo.find_by_id(covered_id as i32).await.unwrap().unwrap();
    repo.mark_covered(pedido).await.unwrap();

    let (status, body) = send(&app, Method::GET, "/api/requests", Some(&collaborator), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], open_id);
    assert_eq!(listed[0]["status"], "open");
    assert_eq!(listed[0]["project_id"], project_id);
    assert_eq!(listed[0]["project_name"], "Agua");
    assert_eq!(listed[0]["project_country"], "Argentina");
    assert_eq!(listed[0]["ong_name"], "ONG-A");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/requests/{}/commit", covered_id),
        Some(&collaborator),
        Some(json!({ "details": "tarde", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the project listing still shows both, whatever their status
    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/requests", project_id),
        Some(&collaborator),
        None,
    )
    .await;
    let statuses: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["open", "covered"]);
}

#[tokio::test]
async fn commit_to_unknown_request_is_not_found() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, token) = register_and_login(&app, "ONG-B", "secret-b").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/requests/77/commit",
        Some(&token),
        Some(json!({ "details": "x", "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_owner_adds_requests() {
    let (app, db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, other) = register_and_login(&app, "ONG-B", "secret-b").await;
    let project_id = create_project(&app, &owner, "Agua").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/requests", project_id),
        Some(&other),
        Some(json!({ "type": "dinero", "description": "fondos", "amount": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/projects/999/requests",
        Some(&owner),
        Some(json!({ "type": "dinero", "description": "fondos", "amount": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/requests", project_id),
        Some(&owner),
        Some(json!({ "description": "fondos" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["missing"], json!(["request_type", "amount"]));

    assert_eq!(PedidoColaboracion::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn request_on_project_without_coverage_plan_is_not_found() {
    let (app, db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let project_id = create_project(&app, &owner, "Agua").await;

    CoveragePlan::delete_many()
        .filter(coverage_plan::Column::ProjectId.eq(project_id as i32))
        .exec(&db)
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/projects/{}/requests", project_id),
        Some(&owner),
        Some(json!({ "type": "dinero", "description": "fondos", "amount": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{}/commitments", project_id),
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn fulfil_is_owner_only_and_repeatable() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, collaborator) = register_and_login(&app, "ONG-B", "secret-b").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let request_id = create_request(&app, &owner, project_id, "materiales", 100.0).await;
    let commitment_id = commit(&app, &collaborator, request_id, 50.0).await;
    let uri = format!("/api/commitments/{}/fulfill", commitment_id);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(&collaborator), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let (status, body) = send(&app, Method::PATCH, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "fulfilled");
    }

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/commitments/12345/fulfill",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn project_commitments_are_owner_only() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, owner) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, collaborator) = register_and_login(&app, "ONG-B", "secret-b").await;
    let (_, third) = register_and_login(&app, "ONG-C", "secret-c").await;
    let project_id = create_project(&app, &owner, "Agua").await;
    let first = create_request(&app, &owner, project_id, "materiales", 100.0).await;
    let second = create_request(&app, &owner, project_id, "dinero", 2500.0).await;
    commit(&app, &collaborator, first, 50.0).await;
    commit(&app, &third, second, 1000.0).await;

    let uri = format!("/api/projects/{}/commitments", project_id);

    let (status, _) = send(&app, Method::GET, &uri, Some(&collaborator), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/projects/999/commitments", Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["request_id"], first);
    assert_eq!(entries[0]["request_type"], "materiales");
    assert_eq!(entries[0]["ong_name"], "ONG-B");
    assert_eq!(entries[1]["request_id"], second);
    assert_eq!(entries[1]["ong_name"], "ONG-C");
}
