#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod files;
mod git;
mod test_case;

pub use files::*;
pub use git::*;
pub use test_case::*;
