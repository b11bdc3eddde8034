#![allow(dead_code)]

use actix_web::{dev::Server, get, web, App, HttpRequest, HttpResponse, HttpServer};
use feedback::configuration::{get_configuration, DatabaseSettings, FeedbackSettings, Settings};
use feedback::forms;
use feedback::services::feedback::{FeedbackRepository, MockFeedbackRepository};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::net::TcpListener;
use std::sync::Arc;

pub const PRODUCT_ID: i32 = 5;
pub const OTHER_PRODUCT_ID: i32 = 6;
pub const ADMIN_TOKEN: &str = "admin-1";
pub const OWNER_TOKEN: &str = "user-2";
pub const OTHER_TOKEN: &str = "user-3";

pub struct TestApp {
    pub address: String,
    pub repository: Arc<MockFeedbackRepository>,
}

fn test_settings(auth_url: String, one_per_user_per_product: bool) -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database_name: "feedback".to_string(),
        },
        app_port: 0,
        app_host: "127.0.0.1".to_string(),
        auth_url,
        feedback: FeedbackSettings {
            one_per_user_per_product,
        },
    }
}

/// Server on the in-memory repository. Tokens resolve through a mock auth
/// server knowing user 1 (admin), 2 and 3.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_policy(true).await
}

pub async fn spawn_app_with_policy(one_per_user_per_product: bool) -> TestApp {
    let auth_listener =
        TcpListener::bind("127.0.0.1:0").expect("Failed to bind port for testing auth server");
    let auth_url = format!(
        "http://127.0.0.1:{}/me",
        auth_listener.local_addr().unwrap().port()
    );
    let _ = tokio::spawn(mock_auth_server(auth_listener));

    let repository = Arc::new(
        MockFeedbackRepository::new()
            .with_product(PRODUCT_ID, "Sample Laptop")
            .with_product(OTHER_PRODUCT_ID, "Sample Headphones")
            .with_user(1, "admin@example.com")
            .with_user(2, "owner@example.com")
            .with_user(3, "other@example.com")
            .with_unique_pair(one_per_user_per_product),
    );

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = feedback::startup::run(
        listener,
        repository.clone() as Arc<dyn FeedbackRepository>,
        test_settings(auth_url, one_per_user_per_product),
    )
    .await
    .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        repository,
    }
}

/// Tokens look like `admin-<id>` or `user-<id>`.
fn user_for_token(token: &str) -> Option<forms::user::User> {
    let (role, id) = token.split_once('-')?;
    let id = id.parse::<i32>().ok()?;
    let email = match id {
        1 => "admin@example.com",
        2 => "owner@example.com",
        3 => "other@example.com",
        _ => return None,
    };

    Some(forms::user::User {
        id,
        email: email.to_string(),
        role: Some(role.to_string()),
    })
}

#[get("")]
async fn mock_auth(req: HttpRequest) -> HttpResponse {
    let user = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(user_for_token);

    match user {
        Some(user) => HttpResponse::Ok().json(forms::UserForm { user }),
        None => HttpResponse::Unauthorized().finish(),
    }
}

fn mock_auth_server(listener: TcpListener) -> Server {
    HttpServer::new(|| App::new().service(web::scope("/me").service(mock_auth)))
        .listen(listener)
        .expect("Failed to bind mock auth server")
        .run()
}

/// Fresh migrated database named after a random uuid.
pub async fn spawn_database() -> PgPool {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    configure_database(&configuration.database)
        .await
        .expect("Failed to prepare postgres database")
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}
