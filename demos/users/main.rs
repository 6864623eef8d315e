//! Users API with validated request and response media
//!
//! ```text
//! cargo run --example users
//! curl -X POST localhost:3000/users -H 'content-type: application/json' \
//!      -d '{"name": "Alice", "email": "alice@example.com"}'
//! curl -X POST localhost:3000/users -H 'content-type: application/json' -d '{}'
//! curl localhost:3000/users
//! ```

use anyhow::Result;
use axum::Json;
use media_guard::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

const CONFIG: &str = include_str!("validation.yaml");

#[derive(Clone, Default)]
struct Users(Arc<Mutex<Vec<Value>>>);

/// POST /users, validated by a wrapped responder
struct CreateUser {
    users: Users,
}

#[async_trait]
impl AsyncResponder<MediaRequest, MediaResponse> for CreateUser {
    type Output = ();
    type Error = GuardError;

    async fn respond_async(
        &self,
        req: &mut MediaRequest,
        resp: &mut MediaResponse,
        _args: (),
    ) -> Result<(), GuardError> {
        let media = req.get_media().await?;

        let user = {
            let mut users = self.users.0.lock().unwrap_or_else(|e| e.into_inner());
            let user = json!({
                "id": users.len() + 1,
                "name": media["name"],
                "email": media["email"],
            });
            users.push(user.clone());
            user
        };

        tracing::info!(id = %user["id"], "User created");
        resp.set_status(StatusCode::CREATED);
        resp.set_media(user);
        Ok(())
    }
}

/// GET /users, a plain axum handler validated by the layer
async fn list_users(State(users): State<Users>) -> Json<Value> {
    let users = users.0.lock().unwrap_or_else(|e| e.into_inner());
    Json(Value::Array(users.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_guard=debug,tower_http=info,users=info".into()),
        )
        .init();

    let config = ValidationConfig::from_yaml_str(CONFIG)?;
    let users = Users::default();

    let create_user = config.validator("create_user")?.wrap(CreateUser {
        users: users.clone(),
    });
    let list_validator = config.validator("list_users")?;

    let app = Router::new()
        .route(
            "/users",
            get(list_users)
                .route_layer(list_validator.layer())
                .post(into_handler(create_user)),
        )
        .with_state(users)
        .layer(TraceLayer::new_for_http());

    let addr = "127.0.0.1:3000";
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
