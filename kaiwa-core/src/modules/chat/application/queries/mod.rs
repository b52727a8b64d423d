// Chat Queries - 查询定义和处理器

mod get_conversation;
mod get_pinned_messages;
mod get_recent_messages;
mod list_conversations;
mod read_context;

pub use get_conversation::*;
pub use get_pinned_messages::*;
pub use get_recent_messages::*;
pub use list_conversations::*;
pub use read_context::*;
