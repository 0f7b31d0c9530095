//! 動作解碼
//!
//! 策略每 tick 輸出 12 個 index（每頭一個），依當前 mask 解碼為結構化指令。
//! 被 mask 掉的選擇降級為該頭的 no-op，並記錄在 `masked_heads`。

use serde::Serialize;
use tracing::warn;

use super::action_mask::ActionMaskSet;
use super::error::ContractError;
use crate::game::{
    ACTION_HEAD_COUNT, HEAD_ATTACK, HEAD_DISTANCE, HEAD_FOOD, HEAD_GEAR, HEAD_KARAMBWAN,
    HEAD_MAGE, HEAD_MELEE, HEAD_MOVEMENT, HEAD_NAMES, HEAD_POTION, HEAD_PRAYER, HEAD_RANGED,
    HEAD_VENGEANCE,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackChoice {
    #[default]
    None,
    Mage,
    Ranged,
    Melee,
}

impl AttackChoice {
    const ALL: [AttackChoice; 4] = [Self::None, Self::Mage, Self::Ranged, Self::Melee];
}

/// 近戰 / 遠程子選擇
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeChoice {
    #[default]
    None,
    Basic,
    Spec,
}

impl StrikeChoice {
    const ALL: [StrikeChoice; 3] = [Self::None, Self::Basic, Self::Spec];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MageChoice {
    #[default]
    None,
    IceBarrage,
    BloodBarrage,
    Spec,
}

impl MageChoice {
    const ALL: [MageChoice; 4] = [Self::None, Self::IceBarrage, Self::BloodBarrage, Self::Spec];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PotionChoice {
    #[default]
    None,
    Brew,
    Restore,
    Combat,
    Ranging,
}

impl PotionChoice {
    const ALL: [PotionChoice; 5] = [
        Self::None,
        Self::Brew,
        Self::Restore,
        Self::Combat,
        Self::Ranging,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementChoice {
    #[default]
    None,
    Adjacent,
    UnderTarget,
    Farcast,
    Diagonal,
}

impl MovementChoice {
    const ALL: [MovementChoice; 5] = [
        Self::None,
        Self::Adjacent,
        Self::UnderTarget,
        Self::Farcast,
        Self::Diagonal,
    ];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerChoice {
    #[default]
    None,
    ProtectMagic,
    ProtectRanged,
    ProtectMelee,
    Smite,
    Redemption,
}

impl PrayerChoice {
    const ALL: [PrayerChoice; 6] = [
        Self::None,
        Self::ProtectMagic,
        Self::ProtectRanged,
        Self::ProtectMelee,
        Self::Smite,
        Self::Redemption,
    ];
}

/// 一個 tick 的完整指令
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PvpCommand {
    pub attack: AttackChoice,
    pub melee: StrikeChoice,
    pub ranged: StrikeChoice,
    pub mage: MageChoice,
    pub potion: PotionChoice,
    pub eat_food: bool,
    pub eat_karambwan: bool,
    pub cast_vengeance: bool,
    pub equip_tank: bool,
    pub movement: MovementChoice,
    /// farcast 距離（格），0 表示不指定
    pub distance: usize,
    pub prayer: PrayerChoice,
    /// 被 mask 降級為 no-op 的頭
    pub masked_heads: Vec<&'static str>,
}

impl PvpCommand {
    pub fn is_noop(&self) -> bool {
        let masked = self.masked_heads.clone();
        *self
            == PvpCommand {
                masked_heads: masked,
                ..Default::default()
            }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 把每頭的 index 解碼為指令
pub fn decode_action(indices: &[usize], masks: &ActionMaskSet) -> Result<PvpCommand, ContractError> {
    if indices.len() != ACTION_HEAD_COUNT {
        return Err(ContractError::ActionLength {
            expected: ACTION_HEAD_COUNT,
            actual: indices.len(),
        });
    }
    if masks.head_count() != ACTION_HEAD_COUNT {
        return Err(ContractError::MaskHeadCount {
            expected: ACTION_HEAD_COUNT,
            actual: masks.head_count(),
        });
    }

    let mut masked_heads = Vec::new();
    let mut chosen = [0usize; ACTION_HEAD_COUNT];
    for (head, &index) in indices.iter().enumerate() {
        let size = masks.heads()[head].len();
        if index >= size {
            return Err(ContractError::ActionOutOfRange {
                head: HEAD_NAMES[head],
                index,
                size,
            });
        }
        if masks.is_legal(head, index) {
            chosen[head] = index;
        } else {
            warn!(head = HEAD_NAMES[head], index, "masked action selected, using no-op");
            masked_heads.push(HEAD_NAMES[head]);
        }
    }

    Ok(PvpCommand {
        attack: AttackChoice::ALL[chosen[HEAD_ATTACK]],
        melee: StrikeChoice::ALL[chosen[HEAD_MELEE]],
        ranged: StrikeChoice::ALL[chosen[HEAD_RANGED]],
        mage: MageChoice::ALL[chosen[HEAD_MAGE]],
        potion: PotionChoice::ALL[chosen[HEAD_POTION]],
        eat_food: chosen[HEAD_FOOD] == 1,
        eat_karambwan: chosen[HEAD_KARAMBWAN] == 1,
        cast_vengeance: chosen[HEAD_VENGEANCE] == 1,
        equip_tank: chosen[HEAD_GEAR] == 1,
        movement: MovementChoice::ALL[chosen[HEAD_MOVEMENT]],
        distance: chosen[HEAD_DISTANCE],
        prayer: PrayerChoice::ALL[chosen[HEAD_PRAYER]],
        masked_heads,
    })
}

// ============================================================================
// 單元測試
// ============================================================================
