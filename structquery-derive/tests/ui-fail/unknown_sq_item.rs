//! Test that unsupported `sq` items produce a helpful error
#![allow(dead_code)]

use structquery::QueryStruct;

#[derive(QueryStruct)]
pub struct UserQuery {
    #[sq(rename = "x")]
    pub name: String,
}

fn main() {}
