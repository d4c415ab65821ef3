pub mod common;
mod test_search;
