//! Test that borrowed query structs are rejected
#![allow(dead_code)]

use structquery::QueryStruct;

#[derive(QueryStruct)]
pub struct Borrowed<'a> {
    pub name: &'a str,
}

fn main() {}
