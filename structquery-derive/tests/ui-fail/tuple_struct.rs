//! Test that tuple structs are rejected, their fields have no names
#![allow(dead_code)]

use structquery::QueryStruct;

#[derive(QueryStruct)]
pub struct Pair(i64, i64);

fn main() {}
