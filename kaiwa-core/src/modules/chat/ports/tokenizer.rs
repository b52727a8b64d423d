/// 分词端口
///
/// 聚合只调用此接口统计文本的 token 数，不关心分词的实现方式。
/// 对同一段文本，实现必须返回确定的结果。
pub trait Tokenizer: Send + Sync {
    /// 统计文本的 token 数量
    fn count_tokens(&self, text: &str) -> u32;
}
