use budgetgoat_testing::TestWorld;
use predicates::prelude::*;

#[test]
fn test_init_creates_layout() {
    let world = TestWorld::new();

    world
        .run(&["init"])
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(world.data_dir().join("config.toml").exists());
    assert!(world.data_dir().join("budgetgoat.db").exists());
    assert!(world.data_dir().join("prefs").is_dir());
}

#[test]
fn test_init_is_idempotent() {
    let world = TestWorld::new();

    world.run(&["init"]).success();
    world.run(&["pocket", "add", "Vacation"]).success();
    world.run(&["init"]).success();

    // A second init does not wipe existing data.
    world
        .run(&["pocket", "list"])
        .success()
        .stdout(predicate::str::contains("Vacation"));
}

#[test]
fn test_init_refresh_rewrites_config() {
    let world = TestWorld::new();
    world.run(&["init"]).success();

    let config_path = world.data_dir().join("config.toml");
    std::fs::write(&config_path, "[logging]\nmax_local_logs = 7\n").unwrap();

    world.run(&["init", "--refresh"]).success();

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("max_local_logs = 100"));
}

#[test]
fn test_commands_require_init() {
    let world = TestWorld::new();

    world
        .run(&["pocket", "list"])
        .failure()
        .stderr(predicate::str::contains("run `budgetgoat init` first"));
}

#[test]
fn test_init_json_output() {
    let world = TestWorld::new();

    let output = world
        .run(&["--format", "json", "init"])
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["refreshed"], false);
    assert!(value["database_path"].as_str().unwrap().ends_with("budgetgoat.db"));
}
