// Chat Domain Layer
// 领域层包含业务实体、值对象、业务规则和领域事件

pub mod entities;
pub mod events;
pub mod rules;
pub mod value_objects;

// 重导出常用类型
pub use entities::{Conversation, Message, Participant, RecentContext, DEFAULT_TITLE};
pub use events::*;
pub use rules::ParticipantLimitRule;
pub use value_objects::{
    Content, ConversationId, HistoryWindow, MessageId, Owner, Role, UserId,
};
