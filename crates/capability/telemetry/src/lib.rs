//! 追踪、关联 ID 生成与诊断日志端口。
//!
//! 诊断日志以 `DiagnosticLog` Trait 的形式注入到告警流水线，
//! 生产环境转发到 tracing，测试使用 `MemoryDiagnosticLog` 断言事件。

use domain::AssetId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 correlation_id。
pub fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 诊断事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// 资产主数据中找不到节点（RTU / Host 访问器）。
    MissingNode {
        correlation_id: String,
        asset_id: AssetId,
        accessor: &'static str,
    },
}

impl DiagnosticEvent {
    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticEvent::MissingNode { .. } => "Missing node",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            DiagnosticEvent::MissingNode { correlation_id, .. } => correlation_id,
        }
    }
}

/// 诊断日志端口。
pub trait DiagnosticLog: Send + Sync {
    fn record(&self, event: DiagnosticEvent);
}

/// 转发到 tracing 的诊断日志，附带事件计数。
#[derive(Default)]
pub struct TracingDiagnosticLog {
    missing_node: AtomicU64,
}

impl TracingDiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的 "Missing node" 次数。
    pub fn missing_node_count(&self) -> u64 {
        self.missing_node.load(Ordering::Relaxed)
    }
}

impl DiagnosticLog for TracingDiagnosticLog {
    fn record(&self, event: DiagnosticEvent) {
        match &event {
            DiagnosticEvent::MissingNode {
                correlation_id,
                asset_id,
                accessor,
            } => {
                self.missing_node.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    correlation_id = %correlation_id,
                    asset_id = %asset_id,
                    accessor = *accessor,
                    "{}",
                    event.message()
                );
            }
        }
    }
}

/// 内存诊断日志（测试用）。
#[derive(Default)]
pub struct MemoryDiagnosticLog {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录事件的快照。
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 指定消息的事件数量。
    pub fn count(&self, message: &str) -> usize {
        self.events()
            .iter()
            .filter(|event| event.message() == message)
            .count()
    }
}

impl DiagnosticLog for MemoryDiagnosticLog {
    fn record(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
