//! Test that deriving on an enum is rejected
#![allow(dead_code)]

use structquery::QueryStruct;

#[derive(QueryStruct)]
pub enum Choice {
    A,
    B,
}

fn main() {}
