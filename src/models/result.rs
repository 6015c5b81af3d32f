use super::order::{Order, Transaction};
use serde::{Deserialize, Serialize};

/// 高置信度下限 (不含)
pub const HIGH_CONFIDENCE: f64 = 0.8;
/// 中置信度下限 (不含)
pub const MEDIUM_CONFIDENCE: f64 = 0.5;

/// 带分数的交易
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTxn {
    pub txn: Transaction,
    pub score: f64,
}

/// 匹配结果：每个输入订单一条，按输入顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub order: Order,
    pub txns: Vec<ScoredTxn>,
}

impl Match {
    pub fn empty(order: Order) -> Self {
        Self {
            order,
            txns: Vec::new(),
        }
    }
}

/// 匹配统计信息 (按置信度分档)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub orders: usize,
    pub transactions: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl MatchSummary {
    pub fn from_matches(matches: &[Match]) -> Self {
        let mut summary = Self {
            orders: matches.len(),
            ..Self::default()
        };

        for scored in matches.iter().flat_map(|m| m.txns.iter()) {
            summary.transactions += 1;
            if scored.score > HIGH_CONFIDENCE {
                summary.high += 1;
            } else if scored.score > MEDIUM_CONFIDENCE {
                summary.medium += 1;
            } else {
                summary.low += 1;
            }
        }

        summary
    }
}
