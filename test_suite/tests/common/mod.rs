use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Schema, Set,
};
use serde_json::json;

pub mod user_entity;

use user_entity as user;

// Helper function to get database URL from environment or default to SQLite
fn get_test_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Connects, creates the `users` table and seeds it.
///
/// | id | name    | email             | age | created_at | last_visit | tags.name |
/// |----|---------|-------------------|-----|------------|------------|-----------|
/// | 1  | alice   | alice@example.com | 30  | 100        | 1000       | gorm      |
/// | 2  | bob     | bob@example.com   | 25  | 200        | 2000       | sea       |
/// | 3  | charlie | charlie@test.org  | 41  | 300        | 3000       | gorm-ext  |
/// | 4  | dave    | dave@test.org     | 19  | 400        | 4000       | diesel    |
#[allow(dead_code)]
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    init_tracing();
    let db = Database::connect(&get_test_database_url()).await?;

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut create = schema.create_table_from_entity(user::Entity);
    create.if_not_exists();
    db.execute(backend.build(&create)).await?;
    user::Entity::delete_many().exec(&db).await?;

    let rows = [
        (1, "alice", "alice@example.com", 30, 100, "gorm"),
        (2, "bob", "bob@example.com", 25, 200, "sea"),
        (3, "charlie", "charlie@test.org", 41, 300, "gorm-ext"),
        (4, "dave", "dave@test.org", 19, 400, "diesel"),
    ];
    let models = rows
        .into_iter()
        .map(|(id, name, email, age, created_at, tag)| user::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            age: Set(age),
            created_at: Set(created_at),
            last_visit: Set(created_at * 10),
            tags: Set(json!({ "name": tag })),
        });
    user::Entity::insert_many(models).exec(&db).await?;

    Ok(db)
}

/// Names of the users matched by `select`, ordered by id.
#[allow(dead_code)]
pub async fn names(
    db: &DatabaseConnection,
    select: sea_orm::Select<user::Entity>,
) -> Result<Vec<String>, DbErr> {
    let users = select.order_by_asc(user::Column::Id).all(db).await?;
    Ok(users.into_iter().map(|user| user.name).collect())
}
