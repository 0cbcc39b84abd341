use budgetgoat_testing::TestWorld;
use predicates::prelude::*;

#[test]
fn test_prefs_set_and_get() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    world
        .run(&["prefs", "set", "theme_preference", "dark"])
        .success()
        .stdout(predicate::str::contains("theme_preference = dark"));

    world
        .run(&["prefs", "get", "theme_preference"])
        .success()
        .stdout(predicate::str::is_match("^dark\n$").unwrap());
}

#[test]
fn test_prefs_get_unset_key_returns_default() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    world
        .run(&["prefs", "get", "theme_preference"])
        .success()
        .stdout(predicate::str::is_match("^null\n$").unwrap());
}

#[test]
fn test_prefs_set_json_value() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    world
        .run(&["prefs", "set", "notifications_enabled", "true"])
        .success();

    let output = world
        .run(&["--format", "json", "prefs", "get", "notifications_enabled"])
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value, serde_json::Value::Bool(true));
}

#[test]
fn test_prefs_unset_resets_to_default() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    world.run(&["prefs", "set", "currency_code", "EUR"]).success();
    world
        .run(&["prefs", "unset", "currency_code"])
        .success()
        .stdout(predicate::str::contains("Cleared currency_code"));

    world
        .run(&["prefs", "get", "currency_code"])
        .success()
        .stdout(predicate::str::is_match("^null\n$").unwrap());
}

#[test]
fn test_prefs_corrupt_value_degrades_to_default() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    // Corrupt the stored file behind the accessor's back.
    std::fs::write(
        world.data_dir().join("prefs/theme_preference.json"),
        "not valid json",
    )
    .unwrap();

    // The command still succeeds and falls back to the default.
    world
        .run(&["prefs", "get", "theme_preference"])
        .success()
        .stdout(predicate::str::is_match("^null\n$").unwrap());

    // The degradation is visible in the diagnostics dump.
    world
        .run(&["--diagnostics", "prefs", "get", "theme_preference"])
        .success()
        .stderr(predicate::str::contains("failed to deserialize"));
}

#[test]
fn test_prefs_list_shows_all_registered_keys() {
    let world = TestWorld::new();
    world.run(&["init"]).success();
    world.run(&["prefs", "set", "theme_preference", "dark"]).success();

    world
        .run(&["prefs", "list"])
        .success()
        .stdout(predicate::str::contains("theme_preference = dark"))
        .stdout(predicate::str::contains("onboarding_complete = null"))
        .stdout(predicate::str::contains("currency_code = null"))
        .stdout(predicate::str::contains("notifications_enabled = null"))
        .stdout(predicate::str::contains("last_export_at = null"));
}

#[test]
fn test_prefs_unregistered_key_warns_but_works() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    world
        .run(&["--diagnostics", "prefs", "set", "mystery_key", "1"])
        .success()
        .stderr(predicate::str::contains("not a registered preference key"));

    world
        .run(&["prefs", "get", "mystery_key"])
        .success()
        .stdout(predicate::str::is_match("^1\n$").unwrap());
}
