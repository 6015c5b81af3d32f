use super::fuzzy::fuzzy_visual_score;
use crate::error::MatchError;
use crate::models::{Order, Transaction};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// 参与匹配的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    Customer,
    OrderId,
    Date,
    Item,
    Price,
}

impl MatchField {
    /// 固定的规范顺序，聚合与权重表共用，保证求和顺序可复现
    pub const ALL: [MatchField; 5] = [
        MatchField::Customer,
        MatchField::OrderId,
        MatchField::Date,
        MatchField::Item,
        MatchField::Price,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MatchField::Customer => "customer",
            MatchField::OrderId => "orderId",
            MatchField::Date => "date",
            MatchField::Item => "item",
            MatchField::Price => "price",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 数值字段的文本形式 (最短十进制表示，`1.0` -> "1")
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // -0.0 也输出 "0"
        return "0".to_string();
    }
    value.to_string()
}

/// 可参与模糊比较的记录
pub trait FieldSource {
    fn field_text(&self, field: MatchField) -> Cow<'_, str>;
}

impl FieldSource for Order {
    fn field_text(&self, field: MatchField) -> Cow<'_, str> {
        match field {
            MatchField::Customer => Cow::Borrowed(self.customer.as_str()),
            MatchField::OrderId => Cow::Borrowed(self.order_id.as_str()),
            MatchField::Date => Cow::Borrowed(self.date.as_str()),
            MatchField::Item => Cow::Borrowed(self.item.as_str()),
            MatchField::Price => Cow::Owned(format_number(self.price)),
        }
    }
}

impl FieldSource for Transaction {
    fn field_text(&self, field: MatchField) -> Cow<'_, str> {
        match field {
            MatchField::Customer => Cow::Borrowed(self.customer.as_str()),
            MatchField::OrderId => Cow::Borrowed(self.order_id.as_str()),
            MatchField::Date => Cow::Borrowed(self.date.as_str()),
            MatchField::Item => Cow::Borrowed(self.item.as_str()),
            MatchField::Price => Cow::Owned(format_number(self.price)),
        }
    }
}

/// 字段权重，权重越低该字段不匹配时扣分越少
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    weights: [f64; 5],
    total: f64,
}

impl FieldWeights {
    /// 按 `MatchField::ALL` 顺序给出权重
    pub fn new(weights: [f64; 5]) -> Result<Self, MatchError> {
        for field in MatchField::ALL {
            let weight = weights[field.index()];
            if !(weight.is_finite() && weight > 0.0) {
                return Err(MatchError::InvalidWeight { field, weight });
            }
        }

        let total = MatchField::ALL
            .iter()
            .fold(0.0, |acc, f| acc + weights[f.index()]);
        Ok(Self { weights, total })
    }

    pub fn get(&self, field: MatchField) -> f64 {
        self.weights[field.index()]
    }

    /// 归一化分母
    pub fn total(&self) -> f64 {
        self.total
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        let weights = [1.0, 1.0, 0.7, 0.8, 0.9];
        let total = MatchField::ALL
            .iter()
            .fold(0.0, |acc, f| acc + weights[f.index()]);
        Self { weights, total }
    }
}

/// 单个订单与单笔交易的加权分数之和 (未归一化)
pub fn weighted_score(weights: &FieldWeights, order: &Order, txn: &Transaction) -> f64 {
    MatchField::ALL.iter().fold(0.0, |acc, &field| {
        let score = fuzzy_visual_score(&order.field_text(field), &txn.field_text(field));
        acc + score * weights.get(field)
    })
}

/// 单笔交易对全部订单的加权分数，下标与 `orders` 对齐
pub fn aggregate_scores(weights: &FieldWeights, orders: &[Order], txn: &Transaction) -> Vec<f64> {
    orders
        .iter()
        .map(|order| weighted_score(weights, order, txn))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            customer: "Alex Abel".into(),
            order_id: "18G".into(),
            date: "2023-07-11".into(),
            item: "Tool A".into(),
            price: 1.23,
        }
    }

    #[test]
    fn canonical_order_and_names() {
        let names: Vec<_> = MatchField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["customer", "orderId", "date", "item", "price"]);
        assert_eq!(MatchField::OrderId.to_string(), "orderId");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1.23), "1.23");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(6.32), "6.32");
    }

    #[test]
    fn default_weights() {
        let w = FieldWeights::default();
        assert_eq!(w.get(MatchField::Customer), 1.0);
        assert_eq!(w.get(MatchField::Date), 0.7);
        assert_eq!(w.get(MatchField::Price), 0.9);
        assert!((w.total() - 4.4).abs() < 1e-12);
        assert_eq!(FieldWeights::new([1.0, 1.0, 0.7, 0.8, 0.9]).unwrap(), w);
    }

    #[test]
    fn rejects_bad_weights() {
        let err = FieldWeights::new([1.0, 0.0, 0.7, 0.8, 0.9]).unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidWeight { field: MatchField::OrderId, .. }
        ));
        assert!(FieldWeights::new([1.0, 1.0, f64::NAN, 0.8, 0.9]).is_err());
        assert!(FieldWeights::new([-1.0, 1.0, 0.7, 0.8, 0.9]).is_err());
    }

    #[test]
    fn exact_match_hits_weight_total() {
        let w = FieldWeights::default();
        let o = order();
        let txn = Transaction::from_order(&o, "payment", 1.23);
        assert_eq!(weighted_score(&w, &o, &txn), w.total());
    }

    #[test]
    fn weights_scale_field_mismatch() {
        let o = order();
        let mut txn = Transaction::from_order(&o, "payment", 1.23);
        txn.date = "xxxxxxxxxx".into();

        let light_date = FieldWeights::new([1.0, 1.0, 0.1, 0.8, 0.9]).unwrap();
        let heavy_date = FieldWeights::new([1.0, 1.0, 5.0, 0.8, 0.9]).unwrap();
        let light = weighted_score(&light_date, &o, &txn) / light_date.total();
        let heavy = weighted_score(&heavy_date, &o, &txn) / heavy_date.total();
        assert!(light > heavy);
    }

    #[test]
    fn aggregate_aligned_with_orders() {
        let w = FieldWeights::default();
        let o = order();
        let mut other = order();
        other.customer = "Brian Bell".into();
        let txn = Transaction::from_order(&o, "payment", 1.23);

        let scores = aggregate_scores(&w, &[other, o], &txn);
        assert_eq!(scores.len(), 2);
        assert!(scores[1] > scores[0]);
        assert!(aggregate_scores(&w, &[], &txn).is_empty());
    }
}
