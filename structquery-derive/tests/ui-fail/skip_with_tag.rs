//! Test that a skipped field cannot also carry a tag
#![allow(dead_code)]

use structquery::QueryStruct;

#[derive(QueryStruct)]
pub struct UserQuery {
    #[sq(skip, "eq")]
    pub cursor: String,
}

fn main() {}
