use crate::shared::BusinessRule;

/// 参与者数量上限规则
///
/// 在场参与者数量达到上限后不再接纳新成员。
pub struct ParticipantLimitRule {
    current: usize,
    limit: usize,
}

impl ParticipantLimitRule {
    pub fn new(current: usize, limit: usize) -> Self {
        Self { current, limit }
    }
}

impl BusinessRule for ParticipantLimitRule {
    fn is_satisfied(&self) -> bool {
        self.current < self.limit
    }

    fn message(&self) -> String {
        format!("conversation cannot exceed {} participants", self.limit)
    }
}
