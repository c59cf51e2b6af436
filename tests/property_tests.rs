//! Property-based tests for rust_log_wrapper using proptest

use proptest::prelude::*;
use rust_log_wrapper::appenders::MemoryAppender;
use rust_log_wrapper::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Text forms roundtrip through marshal/unmarshal and FromStr
    #[test]
    fn test_level_text_roundtrip(level in any_level()) {
        let text = level.marshal_text();
        prop_assert_eq!(Level::unmarshal_text(&text).unwrap(), level);
        prop_assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
    }

    /// Ordering agrees with the raw numeric values
    #[test]
    fn test_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u32;
        let val2 = level2 as u32;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1.is_enabled_at(level2), val1 <= val2);
        prop_assert_eq!(Level::try_from(val1).unwrap(), level1);
    }

    /// Anything that is not an exact lowercase name is rejected
    #[test]
    fn test_unknown_level_rejected(text in "[a-zA-Z]{1,12}") {
        let known = Level::ALL.iter().any(|l| l.as_str() == text);
        let parsed = text.parse::<Level>();
        prop_assert_eq!(parsed.is_ok(), known);
        if let Err(e) = parsed {
            prop_assert_eq!(e.to_string(), format!("unknown level: {}", text));
        }
    }

    /// Unknown raw values resolve to the defaults
    #[test]
    fn test_raw_enum_fallbacks(raw in 3u32..) {
        prop_assert_eq!(Console::from(raw), Console::Stdout);
        prop_assert_eq!(Console::name_of(raw), "stdout");
        prop_assert_eq!(Formatter::name_of(raw), "text");
    }
}

// ============================================================================
// Record Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every emitted record is exactly one line, whatever the message holds
    #[test]
    fn test_record_is_single_line(message in ".*", json in any::<bool>()) {
        let formatter = if json { Formatter::Json } else { Formatter::Text };
        let log = LogWrapper::new([with_formatter(formatter)]).unwrap();
        let memory = MemoryAppender::new();
        log.set_output(Box::new(memory.clone()));

        log.warn(&message);

        let contents = memory.contents();
        prop_assert!(contents.ends_with('\n'));
        prop_assert_eq!(contents.matches('\n').count(), 1);
    }

    /// JSON records keep the message and field values intact
    #[test]
    fn test_json_preserves_values(message in "\\PC*", key in "[a-z_]{1,8}", value in any::<i64>()) {
        let log = LogWrapper::new([with_formatter(Formatter::Json)]).unwrap();
        let memory = MemoryAppender::new();
        log.set_output(Box::new(memory.clone()));

        log.with_field(key.clone(), value).info(&message);

        let record: serde_json::Value = serde_json::from_str(memory.contents().trim_end()).unwrap();
        prop_assert_eq!(record["msg"].as_str().unwrap(), message.as_str());
        let stored_key = if ["level", "msg", "time", "file"].contains(&key.as_str()) {
            format!("fields.{}", key)
        } else {
            key
        };
        prop_assert_eq!(record[&stored_key].as_i64(), Some(value));
    }

    /// Filtering matches the threshold rule for every pair of levels
    #[test]
    fn test_filtering_matches_threshold(threshold in any_level(), level in any_level()) {
        prop_assume!(level != Level::Panic && level != Level::Fatal);
        let log = LogWrapper::new([with_level(threshold)]).unwrap();
        let memory = MemoryAppender::new();
        log.set_output(Box::new(memory.clone()));

        log.log(level, "filtered");

        prop_assert_eq!(!memory.is_empty(), level <= threshold);
    }
}
