//! 告警引擎错误。

use wellview_storage::StorageError;

/// 告警访问器错误。
///
/// "查无数据"不是错误；只有存储故障与构造期缺少协作者会出现在这里。
#[derive(Debug, thiserror::Error)]
pub enum AlarmError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}
