pub mod fragment;
pub mod text;

pub use fragment::extract_list_quotes;
pub use text::to_plain_text;
