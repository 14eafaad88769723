pub mod ids;

pub use ids::{AssetId, CustomerId, LegacyNodeId};

/// 默认界面语言。
pub const DEFAULT_LOCALE: &str = "en";

/// 请求上下文：所有存储访问与告警视图组装共享的执行上下文。
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub customer_id: CustomerId,
    /// 透传给日志的关联 ID（不参与任何查询）。
    pub correlation_id: String,
    pub locale: String,
}

impl RequestContext {
    /// 构造客户作用域的请求上下文（语言默认 `en`）。
    pub fn new(customer_id: CustomerId, correlation_id: impl Into<String>) -> Self {
        Self {
            customer_id,
            correlation_id: correlation_id.into(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// 指定界面语言。
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        if !locale.trim().is_empty() {
            self.locale = locale;
        }
        self
    }
}
