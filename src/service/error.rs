//! 契約錯誤
//!
//! 只有形狀與有限性違規會回報給呼叫端；缺少輸入、未知 ID、
//! 缺少屬性等可恢復情況都在領域層以中性值降級處理。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("observation length {actual}, expected {expected}")]
    ObservationLength { expected: usize, actual: usize },

    #[error("non-finite observation value {value} at index {index} ({label})")]
    NonFinite {
        index: usize,
        label: String,
        value: f64,
    },

    #[error("action mask has {actual} heads, expected {expected}")]
    MaskHeadCount { expected: usize, actual: usize },

    #[error("action mask head {head} has {actual} options, expected {expected}")]
    MaskHeadSize {
        head: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("action mask head {head} has no legal option")]
    EmptyMaskHead { head: &'static str },

    #[error("action has {actual} heads, expected {expected}")]
    ActionLength { expected: usize, actual: usize },

    #[error("action index {index} out of range for head {head} ({size} options)")]
    ActionOutOfRange {
        head: &'static str,
        index: usize,
        size: usize,
    },

    #[error("no processed tick output available")]
    NoTickOutput,
}

impl ContractError {
    /// 形狀類錯誤：該 tick 的輸出必須整個放棄
    pub fn is_shape_violation(&self) -> bool {
        matches!(
            self,
            ContractError::ObservationLength { .. }
                | ContractError::MaskHeadCount { .. }
                | ContractError::MaskHeadSize { .. }
                | ContractError::ActionLength { .. }
        )
    }
}
