use structquery::QueryStruct;

#[derive(Default, QueryStruct)]
pub struct Paging {
    #[sq("gte;column:created_at")]
    pub created_after: i64,
    #[sq("lte;column:created_at")]
    pub created_before: i64,
}

#[derive(Default, QueryStruct)]
pub struct Tags {
    #[sq("eq")]
    pub tag: String,
}

#[derive(Default, QueryStruct)]
pub struct ArticleQuery {
    #[sq("like")]
    pub title: String,
    #[sq(flatten)]
    pub paging: Paging,
    #[sq(flatten)]
    pub tags: Option<Box<Tags>>,
    #[sq(flatten)]
    pub nested: Box<Option<Box<Tags>>>,
    #[sq("like", flatten)]
    pub r#type: String,
}

fn main() {
    let query = ArticleQuery::default();
    assert_eq!(<ArticleQuery as structquery::reflect::QueryStruct>::fields().len(), 5);
    let _ = structquery::reflect::AsQuery::as_query(&query);
}
