//! # Configuration Tests
//!
//! Tests for the loader configuration property bag: defaults and
//! kebab-case JSON deserialization.

use guestboot_core::LoaderConfig;
use guestboot_core::common::MemTxAttrs;
use pretty_assertions::assert_eq;

#[test]
fn defaults_select_nothing() {
    let config = LoaderConfig::default();
    assert_eq!(config.addr, 0);
    assert_eq!(config.data, 0);
    assert_eq!(config.data_len, 0);
    assert!(!config.data_be);
    assert_eq!(config.cpu_num, None);
    assert!(!config.force_raw);
    assert_eq!(config.reg, None);
    assert_eq!(config.file, None);
    assert_eq!(config.tx_attrs(), MemTxAttrs::default());
}

#[test]
fn deserializes_kebab_case_options() {
    let json = r#"{
        "addr": 4096,
        "data": 305419896,
        "data-len": 4,
        "data-be": true,
        "cpu-num": 1,
        "force-raw": false,
        "reg": "r3",
        "attrs-requester-id": 7,
        "attrs-debug": true,
        "attrs-secure": true
    }"#;
    let config: LoaderConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.addr, 0x1000);
    assert_eq!(config.data, 0x1234_5678);
    assert_eq!(config.data_len, 4);
    assert!(config.data_be);
    assert_eq!(config.cpu_num, Some(1));
    assert_eq!(config.reg.as_deref(), Some("r3"));
    assert_eq!(config.tx_attrs(), MemTxAttrs::new(7, true, true));
}

#[test]
fn absent_cpu_num_is_unspecified() {
    let json = r#"{ "file": "boot.elf" }"#;
    let config: LoaderConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.cpu_num, None);
    assert_eq!(config.file.as_deref(), Some("boot.elf"));
}
