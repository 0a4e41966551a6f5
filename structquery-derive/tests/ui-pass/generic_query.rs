use structquery::QueryStruct;

#[derive(Default, QueryStruct)]
pub struct Range {
    #[sq("gte")]
    pub from: i64,
    #[sq("lte")]
    pub to: i64,
}

#[derive(Default, QueryStruct)]
pub struct Scoped<T: structquery::reflect::QueryStruct> {
    #[sq("eq;column:tenant_id")]
    pub tenant: String,
    #[sq(flatten)]
    pub inner: T,
}

fn main() {
    let query = Scoped::<Range> {
        tenant: "acme".into(),
        ..Default::default()
    };
    let _ = structquery::Queryer::new().to_exprs(&query);
}
