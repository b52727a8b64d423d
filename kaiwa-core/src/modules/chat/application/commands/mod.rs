// Chat Commands - 命令定义和处理器

mod add_participant;
mod delete_conversation;
mod edit_message;
mod pin_message;
mod post_message;
mod remove_participant;
mod rename_conversation;
mod start_conversation;

pub use add_participant::*;
pub use delete_conversation::*;
pub use edit_message::*;
pub use pin_message::*;
pub use post_message::*;
pub use remove_participant::*;
pub use rename_conversation::*;
pub use start_conversation::*;
