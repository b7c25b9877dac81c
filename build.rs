use std::env;
use std::fs;
use std::path::Path;

// Variables que lee config.rs con option_env!
const SCANNER_KEYS: &[&str] = &[
    "SCANNER_WIDTH",
    "SCANNER_HEIGHT",
    "SCANNER_FACING_MODE",
    "SCANNER_MAX_MEDIAN_ERROR",
    "SCANNER_CODE_LENGTH",
];

fn main() {
    for key in SCANNER_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Cargar valores por defecto del scanner desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                // Ignorar comentarios y líneas vacías
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if !SCANNER_KEYS.contains(&key) {
                        println!("cargo:warning=Clave desconocida en .env: {}", key);
                        continue;
                    }

                    // El entorno real gana sobre el .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}
