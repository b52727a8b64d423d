use super::errors::{DomainError, DomainResult};

/// 业务规则
///
/// 聚合在变更状态前咨询的前置条件。规则被破坏时变更必须被拒绝，
/// 且不留下任何副作用。
pub trait BusinessRule {
    /// 规则是否满足
    fn is_satisfied(&self) -> bool;

    /// 规则被破坏时的说明
    fn message(&self) -> String;
}

/// 聚合根
///
/// 聚合根持有唯一标识和待分发的领域事件队列。事件在变更成功时追加，
/// 由外部分发器在事务提交后取走；聚合不负责投递。
pub trait AggregateRoot {
    type Event;

    /// 尚未分发的领域事件
    fn pending_events(&self) -> &[Self::Event];

    /// 记录一条领域事件
    fn record_event(&mut self, event: Self::Event);

    /// 取走全部待分发事件，队列随之清空
    fn take_events(&mut self) -> Vec<Self::Event>;

    /// 检查业务规则，被破坏时返回 [`DomainError::RuleViolation`]
    fn check_rule(&self, rule: &dyn BusinessRule) -> DomainResult<()> {
        if rule.is_satisfied() {
            Ok(())
        } else {
            Err(DomainError::RuleViolation(rule.message()))
        }
    }
}
