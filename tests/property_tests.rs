//! Property-based tests over the domain invariants.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;

use containerfan::adapters::eeprom::MemStorage;
use containerfan::config::ClimateConfig;
use containerfan::control::fan::{FAN_MIN_ON_MS, FanController, decide};
use containerfan::menu::{MenuMachine, MenuNode, ROOT_ENTRIES};
use containerfan::mode::{OperatingMode, determine_mode};
use containerfan::sensors::ClimateSnapshot;
use containerfan::store::ConfigStore;

fn any_mode() -> impl Strategy<Value = OperatingMode> {
    prop_oneof![
        Just(OperatingMode::Summer),
        Just(OperatingMode::Winter),
        Just(OperatingMode::MeasureOnly),
    ]
}

fn valid_snapshot() -> impl Strategy<Value = ClimateSnapshot> {
    (
        -40.0f32..60.0,
        -40.0f32..60.0,
        0.0f32..100.0,
        0.0f32..100.0,
    )
        .prop_map(|(inside_temp, outside_temp, inside_humidity, outside_humidity)| {
            ClimateSnapshot {
                inside_temp,
                outside_temp,
                inside_humidity,
                outside_humidity,
                valid: true,
            }
        })
}

fn in_range_config() -> impl Strategy<Value = ClimateConfig> {
    (
        ClimateConfig::TARGET_TEMP_RANGE.0..=ClimateConfig::TARGET_TEMP_RANGE.1,
        ClimateConfig::TARGET_HUM_RANGE.0..=ClimateConfig::TARGET_HUM_RANGE.1,
        ClimateConfig::MIN_TEMP_RANGE.0..=ClimateConfig::MIN_TEMP_RANGE.1,
        -5.0f32..5.0,
        -10.0f32..10.0,
    )
        .prop_map(|(target_temp, target_humidity, min_temp, t_off, h_off)| ClimateConfig {
            target_temp,
            target_humidity,
            min_temp,
            temp_offset_inside: t_off,
            hum_offset_inside: h_off,
            temp_offset_outside: -t_off,
            hum_offset_outside: -h_off,
        })
}

/// One operator input: encoder detents or a button press.
#[derive(Debug, Clone, Copy)]
enum MenuInput {
    Turn(i32),
    Press,
}

fn menu_inputs() -> impl Strategy<Value = Vec<MenuInput>> {
    prop::collection::vec(
        prop_oneof![(-20i32..=20).prop_map(MenuInput::Turn), Just(MenuInput::Press)],
        0..60,
    )
}

proptest! {
    #[test]
    fn safety_floor_always_wins(
        mode in any_mode(),
        config in in_range_config(),
        mut snap in valid_snapshot(),
    ) {
        // Force the floor condition, keep everything else arbitrary.
        snap.inside_temp = config.min_temp - 0.1;
        prop_assume!(snap.outside_temp < snap.inside_temp);
        prop_assert!(!decide(mode, &snap, &config));
    }

    #[test]
    fn invalid_snapshot_never_demands(mode in any_mode(), config in in_range_config()) {
        prop_assert!(!decide(mode, &ClimateSnapshot::default(), &config));
    }

    #[test]
    fn measure_only_never_demands(config in in_range_config(), snap in valid_snapshot()) {
        prop_assert!(!decide(OperatingMode::MeasureOnly, &snap, &config));
    }

    #[test]
    fn controller_holds_minimum_run_time(
        config in in_range_config(),
        on_snap in valid_snapshot(),
        off_snap in valid_snapshot(),
        mode in prop_oneof![Just(OperatingMode::Summer), Just(OperatingMode::Winter)],
        elapsed in 1u64..FAN_MIN_ON_MS,
    ) {
        prop_assume!(decide(mode, &on_snap, &config));
        prop_assume!(!decide(mode, &off_snap, &config));

        let mut ctl = FanController::new();
        prop_assert!(ctl.update(mode, &on_snap, &config, 0));
        // Demand gone before the hold expires: the relay must stay on.
        prop_assert!(ctl.update(mode, &off_snap, &config, elapsed));
        // At the hold boundary it may finally drop.
        prop_assert!(!ctl.update(mode, &off_snap, &config, FAN_MIN_ON_MS));
    }

    #[test]
    fn mode_selection_is_total_and_fail_safe(winter in any::<bool>(), summer in any::<bool>()) {
        let mode = determine_mode(winter, summer);
        match (winter, summer) {
            (true, false) => prop_assert_eq!(mode, OperatingMode::Winter),
            (false, true) => prop_assert_eq!(mode, OperatingMode::Summer),
            // Contradictory or absent selection resolves to measure-only.
            _ => prop_assert_eq!(mode, OperatingMode::MeasureOnly),
        }
    }

    #[test]
    fn menu_never_escapes_bounds(inputs in menu_inputs()) {
        let mut machine = MenuMachine::new();
        let mut config = ClimateConfig::default();

        for input in inputs {
            match input {
                MenuInput::Turn(detents) => machine.handle_delta(detents, &mut config),
                MenuInput::Press => {
                    machine.handle_button(&mut config);
                }
            }
            let cursor = machine.cursor();
            prop_assert!((0..ROOT_ENTRIES).contains(&cursor.selected_index));
            prop_assert!(config.in_bounds());
            // Edit mode only ever exists on the numeric leaves.
            if cursor.edit_mode {
                prop_assert!(matches!(
                    cursor.node,
                    MenuNode::SetTargetTemp | MenuNode::SetTargetHumidity | MenuNode::SetMinTemp
                ));
            }
        }
    }

    #[test]
    fn persisted_config_round_trips(config in in_range_config()) {
        let mut storage = MemStorage::new();
        let mut store = ConfigStore::new();
        store.force_persist(&config, &mut storage);

        let loaded = ConfigStore::new().load_or_default(&mut storage);
        prop_assert_eq!(loaded, config);
    }
}
