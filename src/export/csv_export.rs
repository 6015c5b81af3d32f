use crate::models::{Match, ScoredTxn};
use crate::service::fields::format_number;
use csv::Writer;
use std::io::Write;

const HEADERS: [&str; 14] = [
    "order_index",
    "customer",
    "order_id",
    "date",
    "item",
    "price",
    "txn_customer",
    "txn_order_id",
    "txn_date",
    "txn_item",
    "txn_price",
    "txn_type",
    "txn_amount",
    "score",
];

/// 将匹配结果写为 CSV，每笔已分配交易一行；没有交易的订单不输出
pub fn write_matches<W: Write>(out: W, matches: &[Match]) -> Result<(), csv::Error> {
    let mut w = Writer::from_writer(out);
    w.write_record(HEADERS)?;
    for (idx, m) in matches.iter().enumerate() {
        for scored in &m.txns {
            write_row(&mut w, idx, m, scored)?;
        }
    }
    w.flush()?;
    Ok(())
}

/// 导出到内存
pub fn matches_to_csv(matches: &[Match]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    write_matches(&mut buf, matches)?;
    Ok(buf)
}

fn write_row<W: Write>(
    w: &mut Writer<W>,
    idx: usize,
    m: &Match,
    scored: &ScoredTxn,
) -> Result<(), csv::Error> {
    let o = &m.order;
    let t = &scored.txn;
    w.write_record([
        idx.to_string(),
        o.customer.clone(),
        o.order_id.clone(),
        o.date.clone(),
        o.item.clone(),
        format_number(o.price),
        t.customer.clone(),
        t.order_id.clone(),
        t.date.clone(),
        t.item.clone(),
        format_number(t.price),
        t.txn_type.clone(),
        format_number(t.txn_amount),
        format!("{:.4}", scored.score),
    ])
}
