use std::fs;

const SECTIONS: [&str; 2] = ["output", "images"];
const FORMATS: [&str; 3] = ["text", "json", "images"];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={config_path}");

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    for section in SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("default_config.toml is missing the [{section}] table");
        }
    }

    // Config::compiled_default falls back to Default on a bad value
    if let Some(format) = table["output"].get("format") {
        match format.as_str() {
            Some(name) if FORMATS.contains(&name) => {}
            _ => panic!("default_config.toml has unknown output.format {format}"),
        }
    }
}
