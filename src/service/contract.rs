//! 輸出契約驗證
//!
//! - 形狀：observation 必須 176 維、mask 必須 12 個頭且大小正確
//! - 有限性：任何 NaN / Infinity 都讓該 tick 的向量作廢
//! - 範圍：只做診斷回報，不截斷（超出範圍本身就是異常訊號）

use tracing::warn;

use super::error::ContractError;
use super::observation::{feature_def, FeatureRange, FEATURE_DEFS};
use crate::game::{head_sizes, ACTION_HEAD_COUNT, HEAD_NAMES, OBS_SIZE};

pub fn validate_observation(data: &[f64]) -> Result<(), ContractError> {
    if data.len() != OBS_SIZE {
        return Err(ContractError::ObservationLength {
            expected: OBS_SIZE,
            actual: data.len(),
        });
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ContractError::NonFinite {
            index,
            label: FEATURE_DEFS[index].name.to_string(),
            value,
        });
    }
    Ok(())
}

pub fn validate_masks(heads: &[Vec<bool>], distance_options: usize) -> Result<(), ContractError> {
    if heads.len() != ACTION_HEAD_COUNT {
        return Err(ContractError::MaskHeadCount {
            expected: ACTION_HEAD_COUNT,
            actual: heads.len(),
        });
    }
    let sizes = head_sizes(distance_options);
    for (i, head) in heads.iter().enumerate() {
        if head.len() != sizes[i] {
            return Err(ContractError::MaskHeadSize {
                head: HEAD_NAMES[i],
                expected: sizes[i],
                actual: head.len(),
            });
        }
        if !head.iter().any(|&legal| legal) {
            return Err(ContractError::EmptyMaskHead { head: HEAD_NAMES[i] });
        }
    }
    Ok(())
}

/// 超出文件範圍的特徵
#[derive(Clone, Debug, PartialEq)]
pub struct RangeAnomaly {
    pub index: usize,
    pub label: &'static str,
    pub value: f64,
    pub range: FeatureRange,
}

/// 列出超出預期範圍的特徵（值保持原樣）
pub fn range_anomalies(data: &[f64]) -> Vec<RangeAnomaly> {
    let anomalies: Vec<RangeAnomaly> = data
        .iter()
        .enumerate()
        .filter_map(|(index, &value)| {
            let def = feature_def(index)?;
            (!def.range.contains(value)).then_some(RangeAnomaly {
                index,
                label: def.name,
                value,
                range: def.range,
            })
        })
        .collect();

    for a in &anomalies {
        warn!(index = a.index, label = a.label, value = a.value, "observation outside documented range");
    }
    anomalies
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_heads() -> Vec<Vec<bool>> {
        head_sizes(7)
            .iter()
            .map(|&n| {
                let mut head = vec![false; n];
                head[0] = true;
                head
            })
            .collect()
    }

    #[test]
    fn test_observation_shape() {
        assert!(validate_observation(&[0.0; OBS_SIZE]).is_ok());
        let err = validate_observation(&[0.0; 175]).unwrap_err();
        assert!(err.is_shape_violation());
        assert_eq!(
            err,
            ContractError::ObservationLength {
                expected: OBS_SIZE,
                actual: 175
            }
        );
    }

    #[test]
    fn test_non_finite_reported() {
        let mut data = vec![0.0; OBS_SIZE];
        data[11] = f64::NAN;
        match validate_observation(&data) {
            Err(ContractError::NonFinite { index, label, .. }) => {
                assert_eq!(index, 11);
                assert_eq!(label, "player_health");
            }
            other => panic!("unexpected {:?}", other),
        }

        data[11] = 0.0;
        data[40] = f64::INFINITY;
        assert!(matches!(
            validate_observation(&data),
            Err(ContractError::NonFinite { index: 40, .. })
        ));
    }

    #[test]
    fn test_masks_valid() {
        assert!(validate_masks(&valid_heads(), 7).is_ok());
    }

    #[test]
    fn test_masks_shape_and_empty_head() {
        let mut heads = valid_heads();
        heads.pop();
        assert!(matches!(
            validate_masks(&heads, 7),
            Err(ContractError::MaskHeadCount { actual: 11, .. })
        ));

        let mut heads = valid_heads();
        heads[5] = vec![false, false];
        assert_eq!(
            validate_masks(&heads, 7),
            Err(ContractError::EmptyMaskHead { head: "food" })
        );

        let heads = valid_heads();
        assert!(matches!(
            validate_masks(&heads, 9),
            Err(ContractError::MaskHeadSize { head: "distance", expected: 9, actual: 7 })
        ));
    }

    #[test]
    fn test_range_anomalies_not_clamped() {
        let mut data = vec![0.0; OBS_SIZE];
        for i in 40..47 {
            data[i] = 99.0;
        }
        data[0] = 2.0; // 旗標只能是 0/1
        data[40] = 118.0; // 加成後超過 99
        let anomalies = range_anomalies(&data);
        let indices: Vec<usize> = anomalies.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 40]);
        assert_eq!(data[40], 118.0);
    }
}
