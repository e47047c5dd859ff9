//! Compiles `config/control.toml` into `$OUT_DIR/control_config.rs`: a single
//! `CONTROL_CONFIG: ControlConfig` constant that `control::config` includes.
//! Invalid tunables (zero settle time, out-of-range pad step, unknown dwell
//! policy, ...) fail the build here rather than misbehaving on the board.

use std::{env, fs, path::PathBuf};

use control_config_compiler::generate_from_path;

const CONTROL_CONFIG_PATH: &str = "config/control.toml";
const GENERATED_FILE: &str = "control_config.rs";

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let config_path = manifest_dir.join(CONTROL_CONFIG_PATH);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let source = match generate_from_path(&config_path) {
        Ok(source) => source,
        Err(err) => panic!("{}: {err}", config_path.display()),
    };

    let out_file = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR")).join(GENERATED_FILE);
    if let Err(err) = fs::write(&out_file, source) {
        panic!("cannot write {}: {err}", out_file.display());
    }
}
