pub mod chat;
pub mod health;
pub mod kb;
pub mod recording;

use axum::Router;

pub fn router() -> Router {
    Router::new()
        .merge(health::router())
        .merge(chat::router())
        .merge(kb::router())
        .merge(recording::router())
}
