//! different utility modules used throughout the project
/// terminal and file logging setup
pub mod logger;
/// PNG charts of a comparison run
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
