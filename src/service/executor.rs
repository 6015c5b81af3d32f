//! 批次执行后端
//!
//! 调度器只依赖 `BatchExecutor`：提交 N 个互相独立的批次任务，等待全部完成，
//! 按提交顺序返回结果。顺序执行与 rayon 线程池可互换。

use crate::error::MatchError;
use crate::models::Match;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

type Job = Box<dyn FnOnce() -> Vec<Match> + Send>;

/// 单个批次任务
pub struct BatchTask {
    index: usize,
    job: Job,
}

impl BatchTask {
    pub fn new<F>(index: usize, job: F) -> Self
    where
        F: FnOnce() -> Vec<Match> + Send + 'static,
    {
        Self {
            index,
            job: Box::new(job),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 执行任务；任务 panic 时转为 `MatchError::Worker`
    pub fn run(self) -> Result<Vec<Match>, MatchError> {
        let Self { index, job } = self;
        catch_unwind(AssertUnwindSafe(job)).map_err(|payload| {
            let reason = panic_message(payload.as_ref());
            tracing::error!("Batch {} panicked: {}", index, reason);
            MatchError::Worker {
                batch: index,
                reason,
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// 批次执行器：结果下标 i 对应任务 i，任一任务失败则整体失败
pub trait BatchExecutor: Send + Sync {
    fn execute(&self, tasks: Vec<BatchTask>) -> Result<Vec<Vec<Match>>, MatchError>;
}

/// 在调用线程上依次执行
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl BatchExecutor for SequentialExecutor {
    fn execute(&self, tasks: Vec<BatchTask>) -> Result<Vec<Vec<Match>>, MatchError> {
        tasks.into_iter().map(BatchTask::run).collect()
    }
}

/// rayon 线程池执行器
///
/// 默认使用专用线程池，避免与 tokio 运行时争用；`global()` 使用 rayon 全局池。
#[derive(Clone)]
pub struct RayonExecutor {
    pool: Option<Arc<ThreadPool>>,
}

impl RayonExecutor {
    /// 创建专用线程池，`threads` 为 None 时按 CPU 核数
    pub fn new(threads: Option<usize>) -> Result<Self, MatchError> {
        let num_threads = optimal_thread_count(threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("xact-matcher-{}", i))
            .build()?;

        tracing::info!("Created matching thread pool with {} threads", num_threads);
        Ok(Self {
            pool: Some(Arc::new(pool)),
        })
    }

    pub fn global() -> Self {
        Self { pool: None }
    }

    pub fn current_num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }
}

fn optimal_thread_count(configured: Option<usize>) -> usize {
    match configured {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .max(1),
    }
}

impl BatchExecutor for RayonExecutor {
    fn execute(&self, tasks: Vec<BatchTask>) -> Result<Vec<Vec<Match>>, MatchError> {
        // collect 保持下标顺序，与完成先后无关
        let run_all = move || {
            tasks
                .into_par_iter()
                .map(BatchTask::run)
                .collect::<Result<Vec<_>, _>>()
        };

        match &self.pool {
            Some(pool) => pool.install(run_all),
            None => run_all(),
        }
    }
}
