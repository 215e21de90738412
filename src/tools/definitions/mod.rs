mod email;
mod message_rewrite;
mod prompt_response;
mod text_summary;

pub use email::email;
pub use message_rewrite::message_rewrite;
pub use prompt_response::prompt_response;
pub use text_summary::text_summary;
