use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, rt, test, web, App, HttpServer};
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::PgPool;
use std::net::TcpListener;

use taskvault::auth::TokenIssuer;
use taskvault::models::{Task, TaskPriority};
use taskvault::routes;

fn test_issuer() -> web::Data<TokenIssuer> {
    web::Data::new(TokenIssuer::new("integration-test-secret", 30))
}

async fn connect_test_db() -> PgPool {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

async fn cleanup_account(pool: &PgPool, username: &str) {
    let _ = sqlx::query("DELETE FROM accounts WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await;
}

/// Registers a fresh account and returns its bearer token.
async fn register_account(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"username": username, "password": password}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "failed to register {}: {}",
        username,
        resp.status()
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn test_create_task_unauthorized_over_the_wire() {
    // No live database needed: the gate rejects before any query runs, so a
    // lazily-initialized pool that never connects is sufficient.
    let pool = PgPool::connect_lazy("postgres://localhost:1/unused").expect("lazy pool");

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener); // Drop the listener so the server can bind to it

    let server_pool = pool.clone();
    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_pool.clone()))
                .app_data(test_issuer())
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header()
                        .max_age(3600),
                )
                .wrap(Logger::default())
                .configure(routes::config)
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let request_url = format!("http://127.0.0.1:{}/tasks", port);

    let resp = client
        .post(&request_url)
        .json(&json!({"title": "Unauthorized Task"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    server_handle.abort();
}

#[ignore]
#[actix_rt::test]
async fn test_task_crud_flow() {
    let pool = connect_test_db().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(test_issuer())
            .configure(routes::config),
    )
    .await;

    let username = "crudalice";
    cleanup_account(&pool, username).await;
    let token = register_account(&app, username, "secret123").await;
    let auth = (header::AUTHORIZATION, format!("Bearer {}", token));

    // 1. Create
    let req = test::TestRequest::post()
        .uri("/tasks")
        .append_header(auth.clone())
        .set_json(json!({"title": "Buy milk", "priority": "high"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.priority, TaskPriority::High);
    assert!(!created.completed);
    let task_id = created.id;

    // 2. List contains exactly the one task
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task_id);
    assert_eq!(tasks[0].title, "Buy milk");

    // 3. Update flips completion and rewrites the title
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", task_id))
        .append_header(auth.clone())
        .set_json(json!({
            "title": "Buy oat milk",
            "completed": true,
            "priority": "low",
            "due_date": "2026-09-15"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.id, task_id);
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.priority, TaskPriority::Low);
    assert!(updated.completed);
    assert_eq!(updated.due_date.as_deref(), Some("2026-09-15"));

    // 4. Delete, then the list is empty and a second delete is 404
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .append_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert!(tasks.is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", task_id))
        .append_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    cleanup_account(&pool, username).await;
}

#[ignore]
#[actix_rt::test]
async fn test_tasks_never_cross_account_boundaries() {
    let pool = connect_test_db().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(test_issuer())
            .configure(routes::config),
    )
    .await;

    let alice = "isolationalice";
    let bob = "isolationbob";
    cleanup_account(&pool, alice).await;
    cleanup_account(&pool, bob).await;

    let alice_token = register_account(&app, alice, "secret123").await;
    let bob_token = register_account(&app, bob, "secret456").await;
    let alice_auth = (header::AUTHORIZATION, format!("Bearer {}", alice_token));
    let bob_auth = (header::AUTHORIZATION, format!("Bearer {}", bob_token));

    // Alice creates a task.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .append_header(alice_auth.clone())
        .set_json(json!({"title": "Alice's secret plan", "priority": "high"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let alices_task: Task = test::read_body_json(resp).await;

    // Bob's list never shows it.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(bob_auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let bobs_tasks: Vec<Task> = test::read_body_json(resp).await;
    assert!(bobs_tasks.iter().all(|t| t.id != alices_task.id));

    // Bob updating it looks exactly like updating a nonexistent task.
    let req = test::TestRequest::put()
        .uri(&format!("/tasks/{}", alices_task.id))
        .append_header(bob_auth.clone())
        .set_json(json!({"title": "Hijacked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // So does deleting it.
    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", alices_task.id))
        .append_header(bob_auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Alice still has the task, untouched.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(alice_auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let alices_tasks: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(alices_tasks.len(), 1);
    assert_eq!(alices_tasks[0].id, alices_task.id);
    assert_eq!(alices_tasks[0].title, "Alice's secret plan");

    cleanup_account(&pool, alice).await;
    cleanup_account(&pool, bob).await;
}

#[ignore]
#[actix_rt::test]
async fn test_invalid_task_input_persists_nothing() {
    let pool = connect_test_db().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(test_issuer())
            .configure(routes::config),
    )
    .await;

    let username = "validationuser";
    cleanup_account(&pool, username).await;
    let token = register_account(&app, username, "secret123").await;
    let auth = (header::AUTHORIZATION, format!("Bearer {}", token));

    // Unknown priority value fails before anything touches the database.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .append_header(auth.clone())
        .set_json(json!({"title": "Urgent thing", "priority": "urgent"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());

    // Empty title is rejected by field validation.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .append_header(auth.clone())
        .set_json(json!({"title": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Title over 200 characters is rejected too.
    let req = test::TestRequest::post()
        .uri("/tasks")
        .append_header(auth.clone())
        .set_json(json!({"title": "a".repeat(201)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Nothing got persisted along the way.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let tasks: Vec<Task> = test::read_body_json(resp).await;
    assert!(tasks.is_empty());

    cleanup_account(&pool, username).await;
}
