use serde_json::Value;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    let json: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// # Errors
///
/// Will return `Err` for anything other than a `log` level name
pub fn check_log_level(level: &str) -> Result<log::LevelFilter, String> {
    level
        .trim()
        .parse()
        .map_err(|_| format!("Unknown log level '{level}'."))
}

/// Validate the seed file format
/// format we expect is this:
/// { "courses": [{"course_id": "...", "name": "...", "tees": [{"color": "white", "rating": <float>, "slope": <int>}]}]
/// , "players": [{"user_id": "...", "name": "..."}]
/// , "rounds": [{"user_id": "...", "course_id": "...", "tee": "white", "date": "YYYY-MM-DD", "hole_scores": [<int>, ...]}]
/// }
/// Every top level key is optional.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(root) = json.as_object() else {
        return Err("The seed file is not in the correct format. Expected an object.".to_string());
    };

    let expected_keys = ["courses", "players", "rounds"];
    for key in root.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The seed file is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }

    for key in expected_keys {
        if let Some(value) = root.get(key) {
            if !value.is_array() {
                return Err(format!(
                    "The json key {key} is not in the correct format. Expected an array."
                ));
            }
        }
    }

    for course in array_items(root.get("courses")) {
        if !course["course_id"].is_string() || !course["name"].is_string() {
            return Err(
                "The json key courses is not in the correct format. Expected objects with keys course_id and name.".to_string()
            );
        }
        for tee in array_items(course.get("tees")) {
            if !tee["color"].is_string() || !tee["rating"].is_number() || !tee["slope"].is_u64()
            {
                return Err(
                    "The json key tees is not in the correct format. Expected objects with keys color, rating and slope.".to_string()
                );
            }
        }
    }

    for player in array_items(root.get("players")) {
        if !player["user_id"].is_string() || !player["name"].is_string() {
            return Err(
                "The json key players is not in the correct format. Expected objects with keys user_id and name.".to_string()
            );
        }
    }

    for round in array_items(root.get("rounds")) {
        let strings_ok = ["user_id", "course_id", "tee", "date"]
            .iter()
            .all(|k| round[*k].is_string());
        let scores_ok = round["hole_scores"]
            .as_array()
            .is_some_and(|scores| scores.iter().all(Value::is_u64));
        if !strings_ok || !scores_ok {
            return Err(
                "The json key rounds is not in the correct format. Expected objects with keys user_id, course_id, tee, date and hole_scores.".to_string()
            );
        }
    }

    Ok(())
}

fn array_items(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
