use axum::Router;

pub async fn create_test_app() -> Router {
    daneo_backend_rust::create_app().await
}
