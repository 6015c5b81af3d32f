use super::executor::{BatchExecutor, BatchTask, RayonExecutor};
use super::matcher::OrderMatcher;
use crate::error::MatchError;
use crate::models::{Match, Order, Transaction};
use std::sync::Arc;

/// 默认批次大小
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// 批量并行匹配调度
///
/// 将交易按固定大小切成连续批次，每批连同完整订单列表交给执行器，
/// 再按批次提交顺序合并。输出与单线程 `match_orders` 一致。
#[derive(Clone)]
pub struct BatchScheduler {
    matcher: OrderMatcher,
    executor: Arc<dyn BatchExecutor>,
    batch_size: usize,
}

impl BatchScheduler {
    pub fn new(
        matcher: OrderMatcher,
        executor: Arc<dyn BatchExecutor>,
        batch_size: usize,
    ) -> Result<Self, MatchError> {
        if batch_size == 0 {
            return Err(MatchError::InvalidBatchSize);
        }
        Ok(Self {
            matcher,
            executor,
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn matcher(&self) -> &OrderMatcher {
        &self.matcher
    }

    /// 同步版本，调用线程阻塞直到所有批次完成
    pub fn batched_match_orders_blocking(
        &self,
        orders: &[Order],
        transactions: &[Transaction],
        batch_size: Option<usize>,
    ) -> Result<Vec<Match>, MatchError> {
        let batch_size = batch_size.unwrap_or(self.batch_size);
        if batch_size == 0 {
            return Err(MatchError::InvalidBatchSize);
        }

        if orders.is_empty() {
            return Ok(Vec::new());
        }
        if transactions.is_empty() {
            return Ok(orders.iter().cloned().map(Match::empty).collect());
        }

        // 订单列表只读共享给所有批次
        let shared: Arc<[Order]> = Arc::from(orders);
        let tasks: Vec<BatchTask> = transactions
            .chunks(batch_size)
            .enumerate()
            .map(|(index, chunk)| {
                let orders = Arc::clone(&shared);
                let batch = chunk.to_vec();
                let matcher = self.matcher;
                BatchTask::new(index, move || {
                    let matches = matcher.match_orders(&orders, &batch);
                    tracing::debug!("Batch {} matched {} transactions", index, batch.len());
                    matches
                })
            })
            .collect();

        let task_count = tasks.len();
        tracing::info!(
            "Dispatching {} transactions against {} orders in {} batches (batch size {})",
            transactions.len(),
            orders.len(),
            task_count,
            batch_size
        );

        let partials = self.executor.execute(tasks)?;
        if partials.len() != task_count || partials.iter().any(|p| p.len() != orders.len()) {
            return Err(MatchError::Dispatch(format!(
                "executor returned {} results for {} batches",
                partials.len(),
                task_count
            )));
        }

        Ok(merge_batches(partials))
    }

    /// 异步入口：整个调度放到 tokio 阻塞线程池，避免占用异步运行时
    pub async fn batched_match_orders(
        &self,
        orders: Vec<Order>,
        transactions: Vec<Transaction>,
        batch_size: Option<usize>,
    ) -> Result<Vec<Match>, MatchError> {
        let scheduler = self.clone();
        tokio::task::spawn_blocking(move || {
            scheduler.batched_match_orders_blocking(&orders, &transactions, batch_size)
        })
        .await
        .map_err(|e| MatchError::Dispatch(e.to_string()))?
    }
}

/// 按批次顺序合并：同一订单下标的 txns 依次拼接
pub fn merge_batches(partials: Vec<Vec<Match>>) -> Vec<Match> {
    let mut partials = partials.into_iter();
    let Some(mut merged) = partials.next() else {
        return Vec::new();
    };

    for partial in partials {
        for (acc, m) in merged.iter_mut().zip(partial) {
            acc.txns.extend(m.txns);
        }
    }

    merged
}

/// 使用默认权重与 rayon 全局线程池的批量匹配
pub async fn batched_match_orders(
    orders: Vec<Order>,
    transactions: Vec<Transaction>,
    batch_size: Option<usize>,
) -> Result<Vec<Match>, MatchError> {
    let scheduler = BatchScheduler::new(
        OrderMatcher::default(),
        Arc::new(RayonExecutor::global()),
        DEFAULT_BATCH_SIZE,
    )?;
    scheduler
        .batched_match_orders(orders, transactions, batch_size)
        .await
}
