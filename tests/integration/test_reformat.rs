//! Integration tests for `--reformat-json`

use crate::helpers::{TestProject, run_bump};
use anyhow::Result;

const COMPACT: &str = "{\"updates\": {\"linux-testing\": {\"latest-version\": \"0.0.9\", \"notes\": [\"fast\", \"small\"]}}, \"generated\": true}\r\n";

#[test]
fn test_reformat_pretty_prints_and_stops() -> Result<()> {
  let project = TestProject::new()?;
  project.write("updates.json", COMPACT)?;
  let iss_before = project.read("setup_script.iss")?;

  let output = run_bump(&project.path, &["0.5.0", "--reformat-json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Reformatted updates.json"));
  assert!(!stdout.contains("Current Versions"));
  assert_eq!(
    project.read("updates.json")?,
    "{\r\n    \"updates\": {\r\n        \"linux-testing\": {\r\n            \"latest-version\": \"0.0.9\",\r\n            \"notes\": [\r\n                \"fast\",\r\n                \"small\"\r\n            ]\r\n        }\r\n    },\r\n    \"generated\": true\r\n}"
  );
  // Nothing else is touched, even with a version given
  assert_eq!(project.read("setup_script.iss")?, iss_before);
  Ok(())
}

#[test]
fn test_reformat_round_trip_keeps_values() -> Result<()> {
  let project = TestProject::new()?;
  project.write("updates.json", COMPACT)?;

  run_bump(&project.path, &["--reformat-json"])?;
  let before: serde_json::Value = serde_json::from_str(COMPACT)?;
  let after: serde_json::Value = serde_json::from_str(&project.read("updates.json")?)?;
  assert_eq!(before, after);

  // Reformatting formatted output is a no-op
  let once = project.read("updates.json")?;
  run_bump(&project.path, &["--reformat-json"])?;
  assert_eq!(project.read("updates.json")?, once);
  Ok(())
}

#[test]
fn test_reformat_custom_path() -> Result<()> {
  let project = TestProject::new()?;
  project.write("dist/channels.json", "{\"updates\":{}}")?;

  run_bump(&project.path, &["--reformat-json", "--json", "dist/channels.json"])?;
  assert_eq!(project.read("dist/channels.json")?, "{\n    \"updates\": {}\n}");
  Ok(())
}
