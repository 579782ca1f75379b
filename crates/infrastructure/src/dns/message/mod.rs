pub mod builder;
pub mod parser;
pub mod record_type_map;

pub use builder::MessageBuilder;
pub use parser::{ParsedResponse, ResponseParser};
pub use record_type_map::RecordTypeMapper;
