use super::fields::{aggregate_scores, FieldWeights};
use crate::models::{Match, Order, ScoredTxn, Transaction};

/// 订单匹配服务 (单线程参考实现)
///
/// 每笔交易总会被分配给得分最高的订单，不设拒绝阈值。
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderMatcher {
    weights: FieldWeights,
}

impl OrderMatcher {
    pub fn new(weights: FieldWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    /// 为单笔交易选出最佳订单，返回 (订单下标, 归一化分数)
    ///
    /// 并列时取下标最小者；`orders` 为空时返回 None。
    pub fn assign(&self, orders: &[Order], txn: &Transaction) -> Option<(usize, f64)> {
        let scores = aggregate_scores(&self.weights, orders, txn);

        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in scores.iter().enumerate() {
            let is_better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if is_better {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, raw)| (idx, (raw / self.weights.total()).clamp(0.0, 1.0)))
    }

    /// 批量匹配：每个订单一条 Match，交易按处理顺序追加
    pub fn match_orders(&self, orders: &[Order], transactions: &[Transaction]) -> Vec<Match> {
        let mut matches: Vec<Match> = orders.iter().cloned().map(Match::empty).collect();
        if orders.is_empty() {
            return matches;
        }

        for txn in transactions {
            if let Some((idx, score)) = self.assign(orders, txn) {
                matches[idx].txns.push(ScoredTxn {
                    txn: txn.clone(),
                    score,
                });
            }
        }

        matches
    }
}

/// 使用默认权重的单线程匹配
pub fn match_orders(orders: &[Order], transactions: &[Transaction]) -> Vec<Match> {
    OrderMatcher::default().match_orders(orders, transactions)
}
