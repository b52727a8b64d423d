// Kaiwa Core - 会话领域核心
//
// 聊天应用的会话（Conversation）领域层：一个聚合维护有序消息、
// 参与者与待分发领域事件，外加端口与内存适配器。持久化、传输
// 和事件投递属于宿主应用。

pub mod infrastructure;
pub mod modules;
pub mod shared;

pub use infrastructure::EventBus;
pub use modules::chat::{ChatModule, ChatModuleConfig};
pub use shared::{AggregateRoot, BusinessRule, DomainError, DomainResult};
