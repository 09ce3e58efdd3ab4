use std::fs;

pub fn write_file(path: &str, content: &str) -> Result<(), String> {
    fs::write(path, content).map_err(|err| format!("failed to write '{}': {}", path, err))
}
