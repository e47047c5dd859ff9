use std::{
    collections::VecDeque,
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use touchmouse::{ControlIo, ControlLoop, PointerReport, RawTouchSample};

const TRACE_HEADER: &str = "cycle,first_detected,x,y,second_detected,x2,y2,button,connected";

#[derive(Clone, Copy)]
struct TraceRow {
    cycle: u32,
    first: RawTouchSample,
    second: RawTouchSample,
    button: bool,
    connected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ExpectedReport {
    dx: i8,
    dy: i8,
    left: u8,
}

/// Serves one trace row per control cycle and records what the loop sends.
#[derive(Default)]
struct TraceIo {
    pending: VecDeque<RawTouchSample>,
    button: bool,
    connected: bool,
    sent: Vec<PointerReport>,
}

impl TraceIo {
    fn load(&mut self, row: &TraceRow) {
        self.pending.clear();
        self.pending.push_back(row.first);
        self.pending.push_back(row.second);
        self.button = row.button;
        self.connected = row.connected;
    }
}

impl ControlIo for TraceIo {
    fn poll_touch(&mut self) -> RawTouchSample {
        self.pending
            .pop_front()
            .unwrap_or_else(RawTouchSample::released)
    }

    fn sink_connected(&mut self) -> bool {
        self.connected
    }

    fn send_report(&mut self, report: &PointerReport) {
        self.sent.push(*report);
    }

    // Replay runs as fast as it can; cycle order is all that matters.
    fn sleep_ms(&mut self, _millis: u32) {}

    fn button_pressed(&mut self) -> bool {
        self.button
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let rows = parse_trace(&trace_path)?;

    let dispatched = replay(&rows);

    println!("report,cycle,dx,dy,left,right,middle");
    for (cycle, report) in &dispatched {
        println!(
            "report,{},{},{},{},{},{}",
            cycle,
            report.dx,
            report.dy,
            report.left_button,
            report.right_button,
            report.middle_button
        );
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected(&expect_path)?;
        let actual = summarize(&dispatched);
        if actual != expected {
            eprintln!("expected: {}", join_reports(&expected));
            eprintln!("actual:   {}", join_reports(&actual));
            return Err("report sequence mismatch".into());
        }
    }

    Ok(())
}

/// Runs every row as one control cycle; returns the sent reports tagged with their cycle.
fn replay(rows: &[TraceRow]) -> Vec<(u32, PointerReport)> {
    let mut control = ControlLoop::default();
    let mut io = TraceIo::default();
    let mut dispatched: Vec<(u32, PointerReport)> = Vec::new();
    for row in rows {
        io.load(row);
        let outcome = control.run_cycle(&mut io);
        if let Some(change) = outcome.mode_change {
            eprintln!("cycle {}: mode {:?}", row.cycle, change);
        }
        for report in io.sent.drain(..) {
            dispatched.push((row.cycle, report));
        }
    }
    dispatched
}

fn summarize(dispatched: &[(u32, PointerReport)]) -> Vec<ExpectedReport> {
    dispatched
        .iter()
        .map(|(_, report)| ExpectedReport {
            dx: report.dx,
            dy: report.dy,
            left: report.left_button,
        })
        .collect()
}

fn usage() -> String {
    "usage: touch_replay <trace.csv> [--expect expected.txt]".to_string()
}

fn join_reports(reports: &[ExpectedReport]) -> String {
    reports
        .iter()
        .map(|r| format!("({},{},{})", r.dx, r.dy, r.left))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_trace(path: &Path) -> Result<Vec<TraceRow>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out: Vec<TraceRow> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == TRACE_HEADER {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() != 9 {
            return Err(format!(
                "{}:{} invalid trace line, expected 9 columns",
                path.display(),
                line_no
            ));
        }

        let field = |idx: usize, name: &str| parse_num::<u16>(parts[idx], path, line_no, name);
        let sample = |detected: u16, x: u16, y: u16| {
            if detected != 0 {
                RawTouchSample::touched(x, y, 0)
            } else {
                RawTouchSample::released()
            }
        };

        out.push(TraceRow {
            cycle: parse_num::<u32>(parts[0], path, line_no, "cycle")?,
            first: sample(
                field(1, "first_detected")?,
                field(2, "x")?,
                field(3, "y")?,
            ),
            second: sample(
                field(4, "second_detected")?,
                field(5, "x2")?,
                field(6, "y2")?,
            ),
            button: field(7, "button")? != 0,
            connected: field(8, "connected")? != 0,
        });
    }

    Ok(out)
}

fn parse_expected(path: &Path) -> Result<Vec<ExpectedReport>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut reports = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = token.split(',').collect();
        if parts.len() != 3 {
            return Err(format!(
                "{}:{} expected dx,dy,left, got: {}",
                path.display(),
                line_no,
                token
            ));
        }
        reports.push(ExpectedReport {
            dx: parse_num::<i8>(parts[0], path, line_no, "dx")?,
            dy: parse_num::<i8>(parts[1], path, line_no, "dy")?,
            left: parse_num::<u8>(parts[2], path, line_no, "left")?,
        });
    }

    Ok(reports)
}

fn parse_num<T>(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace_file(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("traces").join(name)
    }

    #[test]
    fn basic_trace_matches_expected_reports() {
        let rows = parse_trace(&trace_file("basic.csv")).expect("trace parses");
        let expected = parse_expected(&trace_file("basic.expected")).expect("expectation parses");

        let dispatched = replay(&rows);

        assert_eq!(summarize(&dispatched), expected);
        let cycles: Vec<u32> = dispatched.iter().map(|(cycle, _)| *cycle).collect();
        assert_eq!(cycles, vec![1, 2, 4, 5, 6, 8]);
    }

    #[test]
    fn unplugged_rows_send_nothing() {
        let rows = parse_trace(&trace_file("basic.csv")).expect("trace parses");
        let unplugged: Vec<TraceRow> = rows.iter().copied().filter(|row| !row.connected).collect();
        assert_eq!(unplugged.len(), 1);
        assert!(replay(&unplugged).is_empty());
    }
}
