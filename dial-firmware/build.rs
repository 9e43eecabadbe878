//! Build script for dial-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watch.toml at compile time, with the `toml` crate for
//!   syntax and with the firmware's own parser for what boot accepts

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware parser understands
const SECTIONS: [&str; 7] = ["bus", "panel", "light", "touch", "ui", "clock", "timeout"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and arguments for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate watch.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watch.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds watch.toml as its default configuration.    ║\n\
            ║  Please create one in the dial-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read watch.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in watch.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_ranges(&config, &mut errors);
    validate_with_firmware_parser(&config_content, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid watch configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=watch.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every top-level table must be one the firmware knows
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match value {
            toml::Value::Table(_) if !SECTIONS.contains(&name.as_str()) => {
                errors.push(format!("Unknown section [{}]", name));
            }
            toml::Value::Table(_) => {}
            _ if name == "version" => {}
            _ => errors.push(format!("Unexpected top-level key '{}'", name)),
        }
    }
}

/// Pin keys must name a GPIO (`"gpioNN"`, optional `!`/`^`)
fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    for section in SECTIONS {
        let Some(table) = config.get(section).and_then(|s| s.as_table()) else {
            continue;
        };

        for (key, value) in table {
            if key != "pin" && !key.ends_with("_pin") {
                continue;
            }
            match value.as_str() {
                Some(pin) if is_valid_pin(pin) => {}
                Some("none") if key == "miso_pin" => {}
                _ => errors.push(format!("[{}] {} must be \"gpioNN\" (0-29)", section, key)),
            }
        }
    }
}

fn is_valid_pin(value: &str) -> bool {
    let name = value.trim_start_matches(['!', '^']);
    name.strip_prefix("gpio")
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| n <= 29)
}

/// Numeric keys with a fixed range
fn validate_ranges(config: &toml::Value, errors: &mut Vec<String>) {
    let checks: [(&str, &str, i64, i64); 7] = [
        ("bus", "spi_mode", 0, 3),
        ("panel", "offset_rotation", 0, 3),
        ("light", "brightness", 0, 255),
        ("touch", "i2c_port", 0, 1),
        ("touch", "offset_rotation", 0, 3),
        ("ui", "brightness_step", 1, 255),
        ("timeout", "level", 0, 4),
    ];

    for (section, key, min, max) in checks {
        let Some(value) = config.get(section).and_then(|s| s.get(key)) else {
            continue;
        };
        match value.as_integer() {
            Some(n) if (min..=max).contains(&n) => {}
            _ => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
        }
    }
}

/// The embedded copy is parsed at boot by `dial_core::config::parse_config`
fn validate_with_firmware_parser(content: &str, errors: &mut Vec<String>) {
    if let Err(e) = dial_core::config::parse_config(content) {
        errors.push(format!("Rejected by the firmware parser: {:?}", e));
    }
}
