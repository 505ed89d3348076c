//! # Pass Obfuscator
//!
//! A line-oriented source rewriter for the guard script. It relies on the
//! script shape `guard.js` guarantees: one statement per line, no comments,
//! locals prefixed with `__g_`.
//!
//! ## Workflow
//!
//! 1.  **Scan**: the lexer refuses anything it cannot rewrite safely.
//! 2.  **Rename**: every `__g_` identifier gets a generated name.
//! 3.  **Flatten**: runs of two or more bare calls at the top of the IIFE body
//!     become a shuffled `switch` dispatch that replays the original order.
//! 4.  **Dead code**: unreachable functions are inserted after top-level
//!     statements with the profile's density.
//! 5.  **Preludes**: self-defense, debugger trap and console silencer are
//!     prepended.
//! 6.  **String array**: selected literals move into a rotated array read
//!     through an accessor.
//! 7.  **Compact**: indentation and blank lines are dropped.

use super::lexer::{rewrite, scan};
use super::names::NameGenerator;
use super::{ObfuscateError, ObfuscationBackend, ObfuscationProfile};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

/// Prefix marking the guard script's own locals, which are safe to rename.
const PRIVATE_PREFIX: &str = "__g_";

/// Built-in pass pipeline.
///
/// Passes run in a fixed order: renaming, control-flow flattening, dead code,
/// the protective preludes, string-array extraction, then compaction. With a
/// seed the output is reproducible; without one every call draws from
/// entropy.
#[derive(Debug, Clone, Default)]
pub struct PassObfuscator {
    seed: Option<u64>,
}

impl PassObfuscator {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl ObfuscationBackend for PassObfuscator {
    fn apply(&self, source: &str, profile: &ObfuscationProfile) -> Result<String, ObfuscateError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        scan(source)?;

        let mut names = NameGenerator::new(profile.identifier_names);
        names.reserve_existing(source)?;
        let mut code = source.to_string();

        if profile.rename_identifiers {
            code = rename_identifiers(&code, &mut names, &mut rng)?;
        }
        if profile.control_flow_flattening {
            code = flatten_call_sequences(&code, profile.control_flow_flattening_threshold, &mut names, &mut rng)?;
        }
        if profile.dead_code_injection {
            code = inject_dead_code(&code, profile.dead_code_injection_threshold, &mut names, &mut rng)?;
        }

        let mut prelude = Vec::new();
        if profile.self_defending {
            prelude.push(self_defense(&mut names, &mut rng));
        }
        if profile.debug_protection && profile.debug_protection_interval_ms > 0 {
            prelude.push(debug_trap(profile.debug_protection_interval_ms));
        }
        if profile.disable_console_output {
            prelude.push(console_silencer(&mut names, &mut rng));
        }
        if !prelude.is_empty() {
            prelude.push(code);
            code = prelude.join("\n");
        }

        if profile.string_array {
            code = extract_strings(&code, profile, &mut names, &mut rng)?;
        }
        if profile.compact {
            code = compact(&code);
        }

        debug!(
            "Obfuscated script with profile '{}': {} -> {} bytes",
            profile.name,
            source.len(),
            code.len()
        );
        Ok(code)
    }
}

fn regex(pattern: &str) -> Result<Regex, ObfuscateError> {
    Regex::new(pattern).map_err(|e| ObfuscateError::Internal(e.to_string()))
}

struct Line<'a> {
    text: &'a str,
    /// Bracket depth at the start of the line.
    before: i32,
    after: i32,
}

/// Splits `code` into lines with their bracket depths. The second value is
/// the depth of the outermost statement list: the depth after the first line,
/// which is the inside of the wrapping IIFE for guard scripts.
fn lines_with_depth(code: &str) -> Result<(Vec<Line<'_>>, i32), ObfuscateError> {
    let scanned = scan(code)?;
    let mut before = 0;
    let lines: Vec<Line<'_>> = code
        .split('\n')
        .zip(scanned.depth_after.iter())
        .map(|(text, &after)| {
            let line = Line { text, before, after };
            before = after;
            line
        })
        .collect();
    let body = scanned.depth_after.first().copied().unwrap_or(0);
    Ok((lines, body))
}

fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start();
    &line[..line.len() - trimmed.len()]
}

fn rename_identifiers(code: &str, names: &mut NameGenerator, rng: &mut StdRng) -> Result<String, ObfuscateError> {
    let scanned = scan(code)?;
    let private = regex(&format!(r"\b{}[A-Za-z0-9_$]*", PRIVATE_PREFIX))?;
    Ok(rewrite(
        code,
        &scanned.literals,
        |segment| {
            private
                .replace_all(segment, |caps: &regex::Captures<'_>| names.rename(&caps[0], &mut *rng))
                .into_owned()
        },
        |literal, _| literal.to_string(),
    ))
}

/// Rewrites runs of two or more bare `name();` statements into a shuffled
/// `switch` dispatcher driven by an order string.
fn flatten_call_sequences(
    code: &str,
    threshold: f64,
    names: &mut NameGenerator,
    rng: &mut StdRng,
) -> Result<String, ObfuscateError> {
    let (lines, body) = lines_with_depth(code)?;
    let call = regex(r"^\s*[A-Za-z_$][A-Za-z0-9_$]*\(\);\s*$")?;
    let eligible = |i: usize| {
        let line = &lines[i];
        line.before == body && line.after == body && call.is_match(line.text)
    };

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if !(eligible(i) && starts_statement(&lines, i)) {
            out.push(lines[i].text.to_string());
            i += 1;
            continue;
        }
        let mut end = i;
        while end + 1 < lines.len() && eligible(end + 1) {
            end += 1;
        }
        let run = &lines[i..=end];
        if run.len() >= 2 && rng.gen::<f64>() < threshold {
            out.push(dispatcher(run, names, rng));
        } else {
            out.extend(run.iter().map(|line| line.text.to_string()));
        }
        i = end + 1;
    }
    Ok(out.join("\n"))
}

/// True when the previous non-blank line closed a statement or opened a block.
fn starts_statement(lines: &[Line<'_>], index: usize) -> bool {
    lines[..index]
        .iter()
        .rev()
        .map(|line| line.text.trim())
        .find(|text| !text.is_empty())
        .map_or(true, |text| text.ends_with(&[';', '{', '}'][..]))
}

fn dispatcher(run: &[Line<'_>], names: &mut NameGenerator, rng: &mut StdRng) -> String {
    let indent = indentation(run[0].text);
    let mut labels: Vec<usize> = (0..run.len()).collect();
    labels.shuffle(rng);
    let order: Vec<String> = labels.iter().map(|label| label.to_string()).collect();

    let mut cases: Vec<String> = run
        .iter()
        .zip(&labels)
        .map(|(line, label)| format!("case '{}': {} continue;", label, line.text.trim()))
        .collect();
    cases.shuffle(rng);

    let sequence = names.fresh(rng);
    let cursor = names.fresh(rng);
    format!(
        "{indent}var {sequence} = '{order}'.split('|'), {cursor} = 0; while (true) {{ switch ({sequence}[{cursor}++]) {{ {cases} }} break; }}",
        order = order.join("|"),
        cases = cases.join(" "),
    )
}

/// Inserts never-called functions between top-level statements.
fn inject_dead_code(
    code: &str,
    density: f64,
    names: &mut NameGenerator,
    rng: &mut StdRng,
) -> Result<String, ObfuscateError> {
    let (lines, body) = lines_with_depth(code)?;
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        out.push(line.text.to_string());
        let Some(next) = lines.get(i + 1) else {
            continue;
        };
        let text = line.text.trim();
        if line.after != body || !text.ends_with(&[';', '}'][..]) || continues_statement(next.text.trim()) {
            continue;
        }
        if rng.gen::<f64>() < density {
            out.push(format!("{}{}", indentation(line.text), dead_function(names, rng)));
        }
    }
    Ok(out.join("\n"))
}

fn continues_statement(next: &str) -> bool {
    const CONTINUATIONS: [&str; 10] = ["else", "catch", "finally", "while", ")", "]", ".", ",", "?", ":"];
    CONTINUATIONS.iter().any(|prefix| next.starts_with(prefix))
}

fn dead_function(names: &mut NameGenerator, rng: &mut StdRng) -> String {
    let f = names.fresh(rng);
    let a = names.fresh(rng);
    let b = names.fresh(rng);
    let c = names.fresh(rng);
    match rng.gen_range(0..3) {
        0 => format!("function {f}({a}, {b}) {{ var {c} = ({a} ^ {b}) >>> 0; return {c} % 7 === 3 ? {c} : {a} + {b}; }}"),
        1 => format!(
            "var {f} = function ({a}) {{ var {b} = []; for (var {c} = 0; {c} < {a}; {c}++) {{ {b}.push({c} * {c}); }} return {b}; }};"
        ),
        _ => format!(
            "function {f}({a}) {{ if (typeof {a} === 'number' && {a} < 0) {{ return -{a}; }} return String({a}).split('').reverse().join(''); }}"
        ),
    }
}

/// Blanks the page when the script has been reformatted: the probe's source
/// text must stay on one line.
fn self_defense(names: &mut NameGenerator, rng: &mut StdRng) -> String {
    let probe = names.fresh(rng);
    format!(
        "(function () {{ var {probe} = function () {{ return 'ok'; }}; if ({probe}.toString().indexOf('\\n') !== -1) {{ document.documentElement.innerHTML = ''; throw new Error('integrity'); }} }})();"
    )
}

fn debug_trap(interval_ms: u32) -> String {
    format!(
        "setInterval(function () {{ (function () {{ return false; }}).constructor('debugger').call(); }}, {interval_ms});"
    )
}

fn console_silencer(names: &mut NameGenerator, rng: &mut StdRng) -> String {
    let console = names.fresh(rng);
    let methods = names.fresh(rng);
    let i = names.fresh(rng);
    format!(
        "(function () {{ var {console} = window.console || {{}}; var {methods} = ['log', 'info', 'warn', 'error', 'debug', 'table', 'trace']; for (var {i} = 0; {i} < {methods}.length; {i}++) {{ {console}[{methods}[{i}]] = function () {{}}; }} }})();"
    )
}

/// Moves string literals into one array read through an accessor function.
/// Quoted object keys stay where they are.
fn extract_strings(
    code: &str,
    profile: &ObfuscationProfile,
    names: &mut NameGenerator,
    rng: &mut StdRng,
) -> Result<String, ObfuscateError> {
    let scanned = scan(code)?;
    let mut table: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut targets: Vec<Range<usize>> = Vec::new();

    for range in &scanned.literals {
        let token = &code[range.clone()];
        if is_object_key(code, range) || !selected(token, profile.string_array_threshold) {
            continue;
        }
        if !index.contains_key(token) {
            index.insert(token.to_string(), table.len());
            table.push(token.to_string());
        }
        targets.push(range.clone());
    }
    if table.is_empty() {
        return Ok(code.to_string());
    }

    let array = names.fresh(rng);
    let accessor = names.fresh(rng);
    let body = rewrite(
        code,
        &targets,
        |segment| segment.to_string(),
        |token, emitted| {
            let slot = index.get(token).copied().unwrap_or_default();
            let glued = emitted
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
            format!("{}{}({})", if glued { " " } else { "" }, accessor, slot)
        },
    );

    let shift = if profile.string_array_rotate && table.len() > 1 {
        rng.gen_range(1..table.len())
    } else {
        0
    };
    let stored = rotate_for_storage(&table, shift);

    let mut out = vec![format!("var {} = [{}];", array, stored.join(", "))];
    if shift > 0 {
        let list = names.fresh(rng);
        let count = names.fresh(rng);
        out.push(format!(
            "(function ({list}, {count}) {{ while ({count}--) {{ {list}.push({list}.shift()); }} }})({array}, {shift});"
        ));
    }
    let i = names.fresh(rng);
    out.push(format!("function {accessor}({i}) {{ return {array}[{i}]; }}"));
    out.push(body);
    Ok(out.join("\n"))
}

/// Deterministic per-literal pick: the first MD5 byte against the threshold.
fn selected(token: &str, threshold: f64) -> bool {
    let digest = md5::compute(token.as_bytes());
    f64::from(digest.0[0]) < threshold * 256.0
}

fn is_object_key(code: &str, range: &Range<usize>) -> bool {
    let before = code[..range.start].trim_end().chars().next_back();
    let after = code[range.end..].trim_start().chars().next();
    matches!(before, Some('{') | Some(',')) && after == Some(':')
}

/// Array as stored in the script. The runtime prelude rotates it left by
/// `shift` to restore source order.
fn rotate_for_storage(table: &[String], shift: usize) -> Vec<String> {
    let mut stored = table.to_vec();
    let len = stored.len();
    if len > 0 {
        stored.rotate_right(shift % len);
    }
    stored
}

fn compact(code: &str) -> String {
    code.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
