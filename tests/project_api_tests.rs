use axum::http::{Method, StatusCode};
use ngo_collab::{
    auth::issue_token,
    models::{CoveragePlan, WorkPlan, coverage_plan, work_plan},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;

use test_utils::{create_project, project_body, register_and_login, send, setup_app, test_config};

#[tokio::test]
async fn creating_a_project_creates_both_plans() {
    let (app, db) = setup_app().await.unwrap();
    let (ong_id, token) = register_and_login(&app, "ONG-A", "secret-a").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(project_body("Agua Potable")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let project_id = body["id"].as_i64().unwrap();
    assert_eq!(body["name"], "Agua Potable");
    assert_eq!(body["ong_name"], "ONG-A");
    assert_eq!(body["creador_ong_id"], ong_id);
    assert_eq!(body["project_types"], json!(["Agua", "Infraestructura"]));
    assert_eq!(body["work_plan"]["project_id"], project_id);
    assert_eq!(body["work_plan"]["stages"][0]["name"], "Relevamiento");
    assert_eq!(body["work_plan"]["terms_accepted"], false);
    assert_eq!(body["coverage_plan"]["project_id"], project_id);
    assert_eq!(body["coverage_plan"]["organizations"], json!(["Cáritas"]));

    let work_plans = WorkPlan::find()
        .filter(work_plan::Column::ProjectId.eq(project_id as i32))
        .count(&db)
        .await
        .unwrap();
    let coverage_plans = CoveragePlan::find()
        .filter(coverage_plan::Column::ProjectId.eq(project_id as i32))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(work_plans, 1);
    assert_eq!(coverage_plans, 1);
}

#[tokio::test]
async fn missing_project_fields_are_listed() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, token) = register_and_login(&app, "ONG-A", "secret-a").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(json!({ "name": "Solo nombre", "stages": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["missing"],
        json!([
            "description",
            "country",
            "location",
            "budget",
            "duration",
            "objectives",
            "beneficiaries",
            "stages"
        ])
    );

    let (_, projects) = send(&app, Method::GET, "/api/projects", Some(&token), None).await;
    assert_eq!(projects, json!([]));
}

#[tokio::test]
async fn projects_are_listed_most_recent_first() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, token_a) = register_and_login(&app, "ONG-A", "secret-a").await;
    let (_, token_b) = register_and_login(&app, "ONG-B", "secret-b").await;

    let first = create_project(&app, &token_a, "Primero").await;
    let second = create_project(&app, &token_b, "Segundo").await;
    let third = create_project(&app, &token_a, "Tercero").await;

    let (status, body) = send(&app, Method::GET, "/api/projects", Some(&token_b), None).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|project| project["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[tokio::test]
async fn caller_without_ngo_row_gets_not_found() {
    let (app, _db) = setup_app().await.unwrap();
    let token = issue_token(&test_config(), 999).unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&token),
        Some(project_body("Huérfano")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn project_requests_of_unknown_project_is_not_found() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, token) = register_and_login(&app, "ONG-A", "secret-a").await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/projects/42/requests",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_path_is_bad_request() {
    let (app, _db) = setup_app().await.unwrap();
    let (_, token) = register_and_login(&app, "ONG-A", "secret-a").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/projects/abc/requests",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn failed_plan_insert_leaves_no_project_behind() {
    use ngo_collab::{
        models::{ProjectDefinition, Stage},
        repositories::{NewProject, OngRepository, ProjectRepository},
    };
    use sea_orm::ConnectionTrait;

    let db = test_utils::setup_test_db().await.unwrap();
    let ong = OngRepository::new(&db)
        .create("ONG-A", "not-a-real-hash".to_string())
        .await
        .unwrap();

    db.execute_unprepared("DROP TABLE coverage_plans")
        .await
        .unwrap();

    let result = ProjectRepository::new(&db)
        .create_with_plans(NewProject {
            creador_ong_id: ong.id,
            ong_name: ong.name.clone(),
            project_name: "Agua".to_string(),
            description: "Purificación".to_string(),
            country: "Argentina".to_string(),
            location: "Buenos Aires".to_string(),
            budget: 1000.0,
            duration: 6,
            objectives: "Agua limpia".to_string(),
            beneficiaries: "300 personas".to_string(),
            stages: vec![Stage {
                name: "Relevamiento".to_string(),
                start: None,
                end: None,
                activities: None,
                resources: None,
            }],
            ..Default::default()
        })
        .await;

    assert!(result.is_err());
    assert_eq!(ProjectDefinition::find().count(&db).await.unwrap(), 0);
    assert_eq!(WorkPlan::find().count(&db).await.unwrap(), 0);
}
