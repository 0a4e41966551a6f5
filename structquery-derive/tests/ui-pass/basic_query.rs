use structquery::{QueryStruct, Queryer};

#[derive(Default, QueryStruct)]
pub struct UserQuery {
    #[sq("like")]
    pub name: String,
    #[sq("eq")]
    pub email: String,
    #[sq("in;column:id")]
    pub ids: Vec<i64>,
    pub age: Option<i32>,
    #[sq(skip)]
    pub cursor: Option<String>,
}

fn main() {
    let queryer = Queryer::new();
    let query = UserQuery {
        name: "hello".into(),
        ..Default::default()
    };
    let _ = queryer.and(&query);
    let _ = queryer.or(&Some(&query));
}
