//! PvP 感知層
//!
//! 把本地玩家的確認狀態與對手的外觀推論裝備轉成固定形狀的
//! 176 維 observation 與 12 頭 action mask，並把策略輸出解碼成指令。

pub mod game;
pub mod proto;
pub mod service;
