use ngo_collab::{
    auth::verify_password,
    models::{Ong, PedidoColaboracion, ProjectDefinition, RequestStatus, pedido_colaboracion},
    seeds::{self, COLLABORATOR_NGO, CREATOR_NGO},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[path = "test_utils/mod.rs"]
mod test_utils;

#[tokio::test]
async fn seeding_creates_demo_ngos_once() {
    let db = test_utils::setup_test_db().await.unwrap();

    let first = seeds::run_seed(&db, false).await.unwrap();
    let second = seeds::run_seed(&db, false).await.unwrap();

    assert_eq!(first.ong_ids.len(), 2);
    assert_eq!(first.ong_ids, second.ong_ids);
    assert!(first.demo_project_id.is_none());
    assert_eq!(Ong::find().count(&db).await.unwrap(), 2);

    let creator = Ong::find()
        .filter(ngo_collab::models::ong::Column::Name.eq(CREATOR_NGO))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("pass123", &creator.password));

    let collaborator = Ong::find()
        .filter(ngo_collab::models::ong::Column::Name.eq(COLLABORATOR_NGO))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert!(verify_password("pass456", &collaborator.password));
}

#[tokio::test]
async fn demo_project_has_two_open_requests_and_one_covered() {
    let db = test_utils::setup_test_db().await.unwrap();

    let summary = seeds::run_seed(&db, true).await.unwrap();
    assert!(summary.demo_project_id.is_some());

    let again = seeds::run_seed(&db, true).await.unwrap();
    assert!(again.demo_project_id.is_none());
    assert_eq!(ProjectDefinition::find().count(&db).await.unwrap(), 1);

    let open = PedidoColaboracion::find()
        .filter(pedido_colaboracion::Column::Status.eq(RequestStatus::Open))
        .count(&db)
        .await
        .unwrap();
    let covered = PedidoColaboracion::find()
        .filter(pedido_colaboracion::Column::Status.eq(RequestStatus::Covered))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(open, 2);
    assert_eq!(covered, 1);
}

#[tokio::test]
async fn seeded_collaborator_can_see_demo_requests() {
    let db = test_utils::setup_test_db().await.unwrap();
    seeds::run_seed(&db, true).await.unwrap();
    let app = test_utils::build_app(db);

    let (status, body) = test_utils::login(&app, COLLABORATOR_NGO, "pass456").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (_, open) = test_utils::send(
        &app,
        axum::http::Method::GET,
        "/api/requests",
        Some(&token),
        None,
    )
    .await;
    let open = open.as_array().unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|r| r["ong_name"] == CREATOR_NGO));
}

#[tokio::test]
async fn failed_seed_rolls_back_every_row() {
    use sea_orm::ConnectionTrait;

    let db = test_utils::setup_test_db().await.unwrap();
    db.execute_unprepared("DROP TABLE compromisos")
        .await
        .unwrap();
    db.execute_unprepared("DROP TABLE pedidos_colaboracion")
        .await
        .unwrap();

    let result = seeds::run_seed(&db, true).await;

    assert!(result.is_err());
    assert_eq!(Ong::find().count(&db).await.unwrap(), 0);
    assert_eq!(ProjectDefinition::find().count(&db).await.unwrap(), 0);
}
