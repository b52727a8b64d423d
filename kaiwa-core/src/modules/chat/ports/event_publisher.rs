use super::super::domain::ConversationDomainEvent;

/// 事件发布端口
///
/// 聚合只在自己的队列里累积事件；保存成功后由应用层取走并经此
/// 端口交给外部分发器。投递语义（至少一次等）由实现方负责。
pub trait EventPublisher: Send + Sync {
    /// 发布单条事件
    fn publish(&self, event: ConversationDomainEvent);

    /// 按顺序发布一批事件
    fn publish_all(&self, events: Vec<ConversationDomainEvent>) {
        for event in events {
            self.publish(event);
        }
    }
}
