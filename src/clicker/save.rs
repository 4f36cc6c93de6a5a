//! Ruble Clicker セーブ/ロード機能。
//!
//! セーブデータは localStorage の 1 キーに保存するフラットな JSON レコード:
//!
//! ```json
//! {"clicks":0,"currency":0,"automationLevel":0,"clickMultiplier":1,
//!  "premiumBorderOwned":false,"hapticOwned":false}
//! ```
//!
//! ## 互換性方針
//!
//! - バージョンフィールドは持たない。不足フィールドは個別にデフォルト値で補完し、
//!   未知のフィールドは無視する。パースできないデータは破棄する。
//! - ×2 ブーストはレコードに含まれないため、リロード時に有効だったブーストは失われる。
//! - 初期リリースのキー名（`rubles`, `autoLevel`, `rubPerClick`, `goldenBorder`,
//!   `vibroActive`）も読み込み時に受け付ける。

use serde::{Deserialize, Serialize};

use super::config::ClickerConfig;
use super::error::StoreError;
use super::state::ClickerState;

/// シリアライズ済みセーブを保持するキーバリューストア。
pub trait SaveStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, json: &str) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// ネイティブビルドとテスト用のインメモリストア。
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
#[derive(Default)]
pub struct MemoryStore {
    pub value: Option<String>,
    /// true の間、読み込みはすべて失敗する。
    pub fail_reads: bool,
    /// true の間、書き込みと削除はすべて失敗する。
    pub fail_writes: bool,
}

#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_value(json: &str) -> Self {
        Self {
            value: Some(json.to_string()),
            ..Self::default()
        }
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read("storage locked".into()));
        }
        Ok(self.value.clone())
    }

    fn write(&mut self, json: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write("quota exceeded".into()));
        }
        self.value = Some(json.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write("quota exceeded".into()));
        }
        self.value = None;
        Ok(())
    }
}

/// 固定キーを使うブラウザの localStorage。
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveStore for LocalStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(self.key)
            .map_err(|e| StoreError::Read(format!("{e:?}")))
    }

    fn write(&mut self, json: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(self.key, json)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(self.key)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}

/// 永続化するレコード。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveData {
    pub clicks: u64,
    /// 互換性のために書き出すだけ。ロード時は `clicks` から再計算する。
    #[serde(alias = "rubles")]
    pub currency: u64,
    #[serde(alias = "autoLevel")]
    pub automation_level: usize,
    #[serde(alias = "rubPerClick")]
    pub click_multiplier: u64,
    #[serde(alias = "goldenBorder")]
    pub premium_border_owned: bool,
    #[serde(alias = "vibroActive")]
    pub haptic_owned: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            clicks: 0,
            currency: 0,
            automation_level: 0,
            click_multiplier: 1,
            premium_border_owned: false,
            haptic_owned: false,
        }
    }
}

pub fn extract_save(state: &ClickerState) -> SaveData {
    SaveData {
        clicks: state.clicks,
        currency: state.currency,
        automation_level: state.automation_level,
        click_multiplier: state.click_multiplier,
        premium_border_owned: state.premium_border_owned,
        haptic_owned: state.haptic_owned,
    }
}

/// セーブデータを `state` に復元する。
/// レベルはカタログ範囲に丸め、倍率は最低 1、通貨はクリック数から導出する。
pub fn apply_save(state: &mut ClickerState, config: &ClickerConfig, save: &SaveData) {
    state.clicks = save.clicks;
    state.automation_level = save.automation_level.min(config.catalog.len());
    state.click_multiplier = save.click_multiplier.max(1);
    state.premium_border_owned = save.premium_border_owned;
    state.haptic_owned = save.haptic_owned;
    state.recompute_currency(config);
    state.reschedule_automation(config);
}

pub fn parse_save(json: &str) -> Result<SaveData, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// 現在の状態を書き込む。失敗はログに残すだけでゲームは続行する。
pub fn save_game(store: &mut dyn SaveStore, state: &ClickerState) {
    let json = match serde_json::to_string(&extract_save(state)) {
        Ok(j) => j,
        Err(e) => {
            log::warn!("failed to serialize save: {e}");
            return;
        }
    };
    if let Err(e) = store.write(&json) {
        log::warn!("failed to write save: {e}");
    }
}

/// 保存済みセーブを読み込む。
/// データなし・読み込み失敗・不正データはすべて `None`。
/// 不正データは次回のセーブがきれいに始まるよう削除する。
pub fn load_game(store: &mut dyn SaveStore) -> Option<SaveData> {
    let json = match store.read() {
        Ok(Some(j)) => j,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("failed to read save: {e}");
            return None;
        }
    };

    match parse_save(&json) {
        Ok(save) => {
            log::info!(
                "loaded save: {} clicks, automation level {}",
                save.clicks,
                save.automation_level
            );
            Some(save)
        }
        Err(e) => {
            log::warn!("discarding malformed save: {e}");
            if let Err(e) = store.clear() {
                log::warn!("failed to remove malformed save: {e}");
            }
            None
        }
    }
}

/// セーブを完全に削除する。
pub fn delete_save(store: &mut dyn SaveStore) {
    if let Err(e) = store.clear() {
        log::warn!("failed to delete save: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clicker::logic;

    fn cfg() -> ClickerConfig {
        ClickerConfig::default()
    }

    #[test]
    fn save_then_load_restores_persisted_fields() {
        let config = cfg();
        let mut original = ClickerState::new();
        original.clicks = 12_345;
        original.recompute_currency(&config);
        original.automation_level = 3;
        original.click_multiplier = 4;
        original.premium_border_owned = true;
        original.haptic_owned = true;
        original.double_active = true;

        let mut store = MemoryStore::new();
        save_game(&mut store, &original);
        let loaded = load_game(&mut store).unwrap();

        let mut restored = ClickerState::new();
        apply_save(&mut restored, &config, &loaded);

        assert_eq!(restored.clicks, 12_345);
        assert_eq!(restored.currency, 1_234);
        assert_eq!(restored.automation_level, 3);
        assert_eq!(restored.click_multiplier, 4);
        assert!(restored.premium_border_owned);
        assert!(restored.haptic_owned);
        // ブーストはレコードに含まれない
        assert!(!restored.double_active);
        assert!(restored.automation_timer.is_some());
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let mut state = ClickerState::new();
        state.clicks = 25;
        state.recompute_currency(&cfg());
        let json = serde_json::to_string(&extract_save(&state)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "automationLevel",
                "clickMultiplier",
                "clicks",
                "currency",
                "hapticOwned",
                "premiumBorderOwned",
            ]
        );
        assert_eq!(obj["currency"], 2);
        assert!(!obj.contains_key("doubleActive"));
    }

    #[test]
    fn missing_store_value_is_none() {
        let mut store = MemoryStore::new();
        assert!(load_game(&mut store).is_none());
    }

    #[test]
    fn malformed_json_is_discarded() {
        let mut store = MemoryStore::with_value("{not json");
        assert!(load_game(&mut store).is_none());
        assert!(store.value.is_none());
    }

    #[test]
    fn wrong_types_are_malformed() {
        let mut store = MemoryStore::with_value(r#"{"clicks": "lots"}"#);
        assert!(load_game(&mut store).is_none());

        let mut store = MemoryStore::with_value(r#"{"clicks": -5}"#);
        assert!(load_game(&mut store).is_none());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let save = parse_save(r#"{"clicks": 77}"#).unwrap();
        assert_eq!(save.clicks, 77);
        assert_eq!(save.automation_level, 0);
        assert_eq!(save.click_multiplier, 1);
        assert!(!save.haptic_owned);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let save = parse_save(r#"{"clicks": 5, "doubleActive": true, "future": [1,2]}"#).unwrap();
        assert_eq!(save.clicks, 5);
    }

    #[test]
    fn legacy_key_names_are_accepted() {
        let json = r#"{
            "clicks": 340,
            "rubles": 34,
            "autoLevel": 2,
            "rubPerClick": 3,
            "goldenBorder": true,
            "vibroActive": false
        }"#;
        let save = parse_save(json).unwrap();
        assert_eq!(save.currency, 34);
        assert_eq!(save.automation_level, 2);
        assert_eq!(save.click_multiplier, 3);
        assert!(save.premium_border_owned);
        assert!(!save.haptic_owned);
    }

    #[test]
    fn apply_save_enforces_invariants() {
        let config = cfg();
        let save = SaveData {
            clicks: 99,
            currency: 5_000,
            automation_level: 42,
            click_multiplier: 0,
            premium_border_owned: false,
            haptic_owned: false,
        };
        let mut state = ClickerState::new();
        apply_save(&mut state, &config, &save);
        assert_eq!(state.currency, 9);
        assert_eq!(state.automation_level, config.catalog.len());
        assert_eq!(state.click_multiplier, 1);
    }

    #[test]
    fn apply_save_level_zero_has_no_timer() {
        let mut state = ClickerState::new();
        apply_save(&mut state, &cfg(), &SaveData::default());
        assert!(state.automation_timer.is_none());
    }

    #[test]
    fn write_failure_does_not_panic() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        save_game(&mut store, &ClickerState::new());
        assert!(store.value.is_none());
    }

    #[test]
    fn failed_read_counts_as_no_save() {
        let mut store = MemoryStore::with_value(r#"{"clicks": 500}"#);
        store.fail_reads = true;
        assert!(load_game(&mut store).is_none());
        // unreadable is not malformed: the data stays for the next attempt
        assert!(store.value.is_some());
    }

    #[test]
    fn malformed_save_that_cannot_be_removed_still_loads_nothing() {
        let mut store = MemoryStore::with_value("{not json");
        store.fail_writes = true;
        assert!(load_game(&mut store).is_none());
        assert_eq!(store.value.as_deref(), Some("{not json"));
    }

    #[test]
    fn later_save_overwrites_earlier() {
        let config = cfg();
        let mut state = ClickerState::new();
        let mut store = MemoryStore::new();
        logic::register_click(&mut state, &config);
        save_game(&mut store, &state);
        logic::register_click(&mut state, &config);
        save_game(&mut store, &state);
        assert_eq!(load_game(&mut store).map(|s| s.clicks), Some(2));
    }

    #[test]
    fn delete_clears_store() {
        let mut store = MemoryStore::with_value("{}");
        delete_save(&mut store);
        assert!(store.value.is_none());
    }
}
