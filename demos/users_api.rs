//! Filterable users endpoint with axum and sea-orm.
//!
//! Query-string parameters are decoded into a query struct, translated by
//! structquery and attached to a `find()`.
//!
//! ## Run the Example
//!
//! ```bash
//! RUST_LOG=structquery=debug cargo run --example users_api
//! ```
//!
//! Then try:
//! - `curl 'http://localhost:3000/users?name=li'`
//! - `curl 'http://localhost:3000/users?min_age=26&email_domain=example.com'`
//! - `curl 'http://localhost:3000/users?tag=gorm&any=true'`

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Database, QueryFilter, QueryOrder, Schema, Set};
use serde::Deserialize;
use std::env;
use std::sync::Arc;
use structquery::{QueryError, QueryStruct, Queryer};

mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, serde::Serialize)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub email: String,
        pub age: i32,
        #[sea_orm(column_type = "Json")]
        pub tags: Json,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Debug, Default, Deserialize, QueryStruct)]
#[serde(default)]
pub struct UserQuery {
    #[sq("like")]
    pub name: String,
    #[sq("llike;column:email")]
    pub email_domain: String,
    #[sq("gte;column:age")]
    pub min_age: i32,
    #[sq("lte;column:age")]
    pub max_age: i32,
    #[sq("json_extract_like;column:tags;path:$.name")]
    pub tag: String,
    /// Join the filters with OR instead of AND.
    #[sq(skip)]
    pub any: bool,
}

#[derive(Clone)]
struct AppState {
    db: DatabaseConnection,
    queryer: Arc<Queryer>,
}

type ApiError = (StatusCode, String);

fn bad_request(err: &QueryError) -> ApiError {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn internal(err: &DbErr) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<user::Model>>, ApiError> {
    let condition = if query.any {
        state.queryer.or(&query)
    } else {
        state.queryer.and(&query)
    }
    .map_err(|err| bad_request(&err))?;

    let users = user::Entity::find()
        .filter(condition)
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await
        .map_err(|err| internal(&err))?;
    Ok(Json(users))
}

async fn seed(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut create = Schema::new(backend).create_table_from_entity(user::Entity);
    create.if_not_exists();
    db.execute(backend.build(&create)).await?;

    let rows = [
        ("alice", "alice@example.com", 30, "gorm"),
        ("bob", "bob@example.com", 25, "sea"),
        ("charlie", "charlie@test.org", 41, "gorm-ext"),
    ];
    let models = rows.into_iter().map(|(name, email, age, tag)| user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        age: Set(age),
        tags: Set(serde_json::json!({ "name": tag })),
        ..Default::default()
    });
    user::Entity::insert_many(models).exec(db).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let db = Database::connect(&database_url).await?;
    seed(&db).await?;

    let state = AppState {
        db,
        queryer: Arc::new(Queryer::new()),
    };
    let app = Router::new()
        .route("/users", get(list_users))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    tracing::info!("listening on http://localhost:3000/users");
    axum::serve(listener, app).await?;
    Ok(())
}
