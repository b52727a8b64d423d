// Chat Infrastructure Layer
// 基础设施层包含端口的具体实现

pub mod repositories;
pub mod tokenizers;

// 重导出常用类型
pub use repositories::InMemoryConversationRepository;
pub use tokenizers::HeuristicTokenizer;
