//! Help and version text

use crate::schema::{FlagSpec, BUILTIN_FORMATTERS, DEFAULT_FORMATTER, FLAGS};

pub const USAGE: &str = "Usage: rubocop [options] [file1, file2, ...]";

const INDENT: usize = 4;
const SUMMARY_WIDTH: usize = 32;

pub fn version_text() -> String {
    format!("{}\n", env!("CARGO_PKG_VERSION"))
}

pub fn verbose_version_text() -> String {
    format!(
        "{} (running on {} {})\n",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}

/// The full `--help` listing, one entry per flag in declaration order.
pub fn help_text() -> String {
    let mut out = String::new();
    out.push_str(USAGE);
    out.push('\n');

    for spec in FLAGS.iter().filter(|spec| !spec.help.is_empty()) {
        push_entry(&mut out, spec);
        if spec.long == "format" {
            for label in formatter_labels() {
                push_line(&mut out, INDENT + SUMMARY_WIDTH + 3, &label);
            }
        }
    }

    out
}

/// `[p]rogress (default)`, `[fu]ubar`, ... plus the custom class hint.
pub fn formatter_labels() -> Vec<String> {
    let mut labels: Vec<String> = BUILTIN_FORMATTERS
        .iter()
        .map(|(key, name)| {
            let label = format!("[{key}]{}", &name[key.len()..]);
            if *name == DEFAULT_FORMATTER {
                format!("{label} (default)")
            } else {
                label
            }
        })
        .collect();
    labels.push("custom formatter class name".to_string());
    labels
}

fn push_entry(out: &mut String, spec: &FlagSpec) {
    let short = match spec.short {
        Some(c) => format!("-{c}, "),
        None => " ".repeat(4),
    };
    let summary = format!("{short}{}", spec.long_display());
    let desc_column = INDENT + SUMMARY_WIDTH + 1;

    let mut lines = spec.help.iter();
    if summary.len() > SUMMARY_WIDTH {
        push_line(out, INDENT, &summary);
    } else if let Some(first) = lines.next() {
        out.push_str(&" ".repeat(INDENT));
        out.push_str(&format!("{summary:<width$} {first}\n", width = SUMMARY_WIDTH));
    }
    for line in lines {
        push_line(out, desc_column, line);
    }
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str(text);
    out.push('\n');
}
