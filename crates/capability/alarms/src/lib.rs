//! # Wellview 告警聚合与富化引擎
//!
//! 给定资产标识，跨多个独立演化的告警类别、通用参考数据表、参数元数据
//! 与实时通知状态，组装统一的本地化告警视图。
//!
//! ## 组件（自底向上）
//!
//! 1. **参考数据解析** (`reference.rs`)：按 (类型, 键) 查询判别式参考数据
//! 2. **身份解析** (`identity.rs`)：AssetId → 遗留节点标识
//! 3. **告警源读取** (`readers.rs`)：Host / RTU / FacilityTag
//! 4. **摄像头装配** (`camera.rs`)：设备 → 配置 → 最近事件 → 类型
//! 5. **参数关联** (`parameters.rs`)：寄存器参数元数据
//! 6. **通知合并** (`notifications.rs`)：激活状态与最近事务
//! 7. **视图装配** (`service.rs`)：按用例编排，统一"查无数据"语义
//!
//! 引擎只读、无共享可变状态；除返回值外唯一的副作用是通过
//! `DiagnosticLog` 端口发出的诊断事件。

pub mod camera;
pub mod error;
pub mod identity;
pub mod models;
pub mod notifications;
pub mod parameters;
pub mod readers;
pub mod reference;
pub mod service;
mod shape;

pub use camera::CameraAlarmAssembler;
pub use error::AlarmError;
pub use identity::{AssetIdentity, IdentityResolver};
pub use models::*;
pub use notifications::{NotificationIndex, NotificationMerger};
pub use parameters::{ParameterIndex, ParameterJoiner};
pub use readers::{AlarmSourceReader, RtuAlarmQuery};
pub use reference::{HostAlarmCatalog, PhraseBook, ReferenceResolver, StateTables};
pub use service::{AlarmViewService, AlarmViewServiceBuilder};
