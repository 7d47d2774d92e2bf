pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum GatewayPublisherVia {
    Logs,
    Memory,
}
