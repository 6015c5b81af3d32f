use serde::{Deserialize, Serialize};

/// 订单 (Order)
///
/// 身份由其在输入列表中的位置决定，字段完全相同的两个订单仍是两个订单。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer: String,
    pub order_id: String,
    pub date: String,
    pub item: String,
    pub price: f64,
}

/// 交易流水 (Transaction): 订单字段 + 交易类型/金额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub customer: String,
    pub order_id: String,
    pub date: String,
    pub item: String,
    pub price: f64,
    pub txn_type: String,
    pub txn_amount: f64,
}

impl Transaction {
    /// 以订单字段构造一笔交易
    pub fn from_order(order: &Order, txn_type: impl Into<String>, txn_amount: f64) -> Self {
        Self {
            customer: order.customer.clone(),
            order_id: order.order_id.clone(),
            date: order.date.clone(),
            item: order.item.clone(),
            price: order.price,
            txn_type: txn_type.into(),
            txn_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let json = r#"{"customer":"Alex Abel","orderId":"18G","date":"2023-07-11","item":"Tool A","price":1.23,"txnType":"payment","txnAmount":1.23}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.order_id, "18G");
        assert_eq!(txn.txn_type, "payment");

        let back = serde_json::to_value(&txn).unwrap();
        assert_eq!(back["orderId"], "18G");
        assert_eq!(back["txnAmount"], 1.23);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let json = r#"{"customer":"a","orderId":"b","date":"c","item":"d","price":"1.23"}"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }
}
