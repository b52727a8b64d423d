// Shared Building Blocks - 跨模块共享的构建块
//
// - aggregate: 聚合根与业务规则 trait
// - errors: 领域错误分类

pub mod aggregate;
pub mod errors;

pub use aggregate::*;
pub use errors::*;
