pub mod isolation;
pub mod test_utils;
