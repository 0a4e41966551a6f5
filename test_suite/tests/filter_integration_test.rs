// Query structs translated by structquery and executed against a real database

use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, PaginatorTrait};
use structquery::{Field, QueryError, QueryStruct, Queryer};

mod common;
use common::user_entity as user;
use common::{names, setup_test_db};

#[derive(Default, QueryStruct)]
pub struct CreatedRange {
    #[sq("gte;column:created_at")]
    pub start: i64,
    #[sq("lte;column:created_at")]
    pub end: i64,
}

#[derive(Default, QueryStruct)]
pub struct UserQuery {
    #[sq("like")]
    pub name: String,
    #[sq("rlike;column:email")]
    pub email_prefix: String,
    #[sq("in;column:id")]
    pub ids: Vec<i32>,
    #[sq("not_in;column:id")]
    pub exclude_ids: Vec<i32>,
    #[sq("gt")]
    pub age: i32,
    #[sq("json_extract_like;path:$.name")]
    pub tags: String,
    #[sq(flatten)]
    pub created: Option<Box<CreatedRange>>,
}

#[tokio::test]
async fn test_like_filter() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        name: "li".into(),
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["alice", "charlie"]);
}

#[tokio::test]
async fn test_and_combines_every_non_zero_field() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        ids: vec![1, 2, 3],
        age: 26,
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["alice", "charlie"]);

    let query = UserQuery {
        exclude_ids: vec![1, 3],
        email_prefix: "b".into(),
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["bob"]);
}

#[tokio::test]
async fn test_or_matches_any_field() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        name: "dave".into(),
        ids: vec![2],
        ..Default::default()
    };
    let condition = queryer.or(&query).unwrap();
    let select = sea_orm::QueryFilter::filter(user::Entity::find(), condition);
    assert_eq!(names(&db, select).await.unwrap(), ["bob", "dave"]);
}

#[tokio::test]
async fn test_zero_query_matches_everything() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();
    let query = UserQuery::default();

    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(select.count(&db).await.unwrap(), 4);

    let condition = queryer.or(&query).unwrap();
    let select = sea_orm::QueryFilter::filter(user::Entity::find(), condition);
    assert_eq!(select.count(&db).await.unwrap(), 4);
}

#[tokio::test]
async fn test_embedded_range() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        created: Some(Box::new(CreatedRange {
            start: 200,
            end: 300,
        })),
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["bob", "charlie"]);

    let query = UserQuery {
        created: Some(Box::new(CreatedRange {
            start: 250,
            ..Default::default()
        })),
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["charlie", "dave"]);
}

#[tokio::test]
async fn test_json_extract_like() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        tags: "gorm".into(),
        ..Default::default()
    };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["alice", "charlie"]);
}

#[tokio::test]
async fn test_delete_many_with_filter() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();

    let query = UserQuery {
        age: 29,
        ..Default::default()
    };
    let result = queryer
        .filter(user::Entity::delete_many(), &query)
        .unwrap()
        .exec(&db)
        .await
        .unwrap();
    assert_eq!(result.rows_affected, 2);
    assert_eq!(user::Entity::find().count(&db).await.unwrap(), 2);
}

#[derive(Default, QueryStruct)]
pub struct LengthQuery {
    #[sq("name_longer_than;column:name")]
    pub min_name_length: i32,
}

#[tokio::test]
async fn test_custom_operator() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let queryer = Queryer::new();
    queryer.register("name_longer_than", |field: &Field| {
        let sql = format!("LENGTH({}) > ?", field.column_name());
        Some(Expr::cust_with_exprs(sql, [field.value().to_simple_expr()]))
    });

    let query = LengthQuery { min_name_length: 4 };
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["alice", "charlie"]);
}

#[derive(Default, QueryStruct)]
pub struct RawQuery {
    #[sq("unsaferaw;sql:age BETWEEN 20 AND ?")]
    pub max_age: i32,
}

#[tokio::test]
async fn test_unsafe_raw_requires_opt_in() {
    let db = setup_test_db().await.expect("Failed to setup test database");
    let query = RawQuery { max_age: 30 };

    let err = Queryer::new()
        .filter(user::Entity::find(), &query)
        .unwrap_err();
    assert_eq!(err, QueryError::BadQueryType("unsaferaw".into()));

    let queryer = Queryer::builder().unsafe_raw(true).build();
    let select = queryer.filter(user::Entity::find(), &query).unwrap();
    assert_eq!(names(&db, select).await.unwrap(), ["alice", "bob"]);
}
