//! Compiles `config/control.toml` into the `CONTROL_CONFIG` constant consumed by the firmware.

use std::{fmt, fmt::Write as _, fs, path::Path};

use serde::Deserialize;

pub const DWELL_POLICY_RESET_ON_EXIT: &str = "reset_on_exit";
pub const DWELL_POLICY_BANKED: &str = "banked";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ControlFile {
    pub debounce: DebounceSection,
    pub motion: MotionSection,
    pub pad: PadSection,
    pub report: ReportSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DebounceSection {
    pub settle_ms: u32,
    pub echo_sentinel_x: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MotionSection {
    pub dead_zone: u16,
    pub modulus_x: u16,
    pub modulus_y: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PadSection {
    pub step: u8,
    pub dwell_threshold: u32,
    pub dwell_policy: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    pub interval_ms: u32,
}

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

pub fn parse_control_file(path: &Path) -> Result<ControlFile, ConfigCompilerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_control_str(&text)
}

pub fn parse_control_str(text: &str) -> Result<ControlFile, ConfigCompilerError> {
    toml::from_str(text).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn validate_config(config: &ControlFile) -> Result<(), ConfigCompilerError> {
    let mut problems: Vec<&'static str> = Vec::new();

    if config.debounce.settle_ms == 0 {
        problems.push("debounce.settle_ms must be > 0");
    }
    if config.motion.modulus_x == 0 || config.motion.modulus_y == 0 {
        problems.push("motion.modulus_x and motion.modulus_y must be > 0");
    }
    if config.motion.modulus_x <= config.motion.dead_zone
        || config.motion.modulus_y <= config.motion.dead_zone
    {
        problems.push("motion moduli must be > motion.dead_zone");
    }
    if config.pad.step == 0 || config.pad.step > i8::MAX as u8 {
        problems.push("pad.step must be in 1..=127");
    }
    if config.pad.dwell_threshold == 0 {
        problems.push("pad.dwell_threshold must be > 0");
    }
    if dwell_policy_variant(&config.pad.dwell_policy).is_none() {
        problems.push("pad.dwell_policy must be \"reset_on_exit\" or \"banked\"");
    }
    if config.report.interval_ms == 0 {
        problems.push("report.interval_ms must be > 0");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ConfigCompilerError::Validation(problems.join("; ")))
    }
}

fn dwell_policy_variant(name: &str) -> Option<&'static str> {
    match name {
        DWELL_POLICY_RESET_ON_EXIT => Some("DwellPolicy::ResetOnExit"),
        DWELL_POLICY_BANKED => Some("DwellPolicy::Banked"),
        _ => None,
    }
}

/// Renders the constant. Callers validate first; an unknown dwell policy falls back to reset-on-exit.
pub fn render_generated_config(config: &ControlFile) -> String {
    let policy =
        dwell_policy_variant(&config.pad.dwell_policy).unwrap_or("DwellPolicy::ResetOnExit");

    let mut out = String::new();
    out.push_str("// @generated by control_config_compiler from config/control.toml\n");
    out.push_str("pub const CONTROL_CONFIG: ControlConfig = ControlConfig {\n");
    out.push_str("    debounce: DebounceConfig {\n");
    let _ = writeln!(out, "        settle_ms: {},", config.debounce.settle_ms);
    let _ = writeln!(
        out,
        "        echo_sentinel_x: {},",
        config.debounce.echo_sentinel_x
    );
    out.push_str("    },\n");
    out.push_str("    motion: MotionConfig {\n");
    let _ = writeln!(out, "        dead_zone: {},", config.motion.dead_zone);
    let _ = writeln!(out, "        modulus_x: {},", config.motion.modulus_x);
    let _ = writeln!(out, "        modulus_y: {},", config.motion.modulus_y);
    out.push_str("    },\n");
    out.push_str("    pad: PadConfig {\n");
    let _ = writeln!(out, "        step: {},", config.pad.step);
    let _ = writeln!(out, "        dwell_threshold: {},", config.pad.dwell_threshold);
    let _ = writeln!(out, "        dwell_policy: {policy},");
    out.push_str("    },\n");
    out.push_str("    report: ReportConfig {\n");
    let _ = writeln!(out, "        interval_ms: {},", config.report.interval_ms);
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_control_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
