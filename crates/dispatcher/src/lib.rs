//! # Dispatcher
//!
//! 数据包路由模块。
//!
//! 负责：
//! - 构建 id → handler 路由表（重复注册视为配置错误）
//! - 按 id 分发 `Packet`
//! - 隔离 handler 故障，不影响调用方

pub mod audit;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod routing;

pub use contracts::{Packet, PacketHandler};
pub use audit::{JsonlAuditSink, LogAuditSink};
pub use dispatcher::{DispatcherBuilder, PacketDispatcher};
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use routing::RoutingTable;
