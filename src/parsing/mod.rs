pub mod response_parser;

pub use response_parser::{extract_json_block, parse_completion_content, parse_saved_response};
