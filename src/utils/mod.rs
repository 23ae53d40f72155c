pub mod file_detection;
pub mod format;
#[cfg(test)]
pub mod test_helpers;
