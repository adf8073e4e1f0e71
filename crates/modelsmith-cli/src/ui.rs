//! modelsmith CLI UI primitives.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use modelsmith_compiler::ir::{ModelIR, Property, PropertyKind};

/// Terminal palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const VIOLET: Color = Color::Color256(135);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
}

/// Create a clickable file link (OSC 8 hyperlink)
pub fn file_link(path: &Path, line: usize) -> String {
    let abs_path = std::fs::canonicalize(path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string());
    let uri = format!("file://{}#{}", abs_path, line);
    let display = format!("{}:{}", path.display(), line);
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", uri, display)
}

pub fn header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("modelsmith").fg(colors::CYAN).bold(),
        style(version).dim()
    );
}

pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN), msg);
}

pub fn error(msg: &str) {
    eprintln!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

pub fn info(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN), msg);
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

/// `3 declarations · 11 files · 0 failed`
pub fn summary(declarations: usize, files: usize, failed: usize) {
    let failed_text = format!("{} failed", failed);
    let failed_styled = if failed == 0 {
        style(failed_text).fg(colors::DIM)
    } else {
        style(failed_text).fg(colors::MAGENTA).bold()
    };
    println!(
        "    {} declarations {} {} files {} {}",
        declarations,
        symbols::DOT,
        files,
        symbols::DOT,
        failed_styled
    );
}

pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        label,
        duration_ms
    );
}

/// One analyzed declaration, as printed by `inspect`.
pub fn model(model: &ModelIR) {
    println!(
        "  {} {} {}",
        style(symbols::TRIANGLE).fg(colors::CYAN),
        style(&model.names.model.canonical_name()).bold(),
        style(format!("({})", model.declaration)).fg(colors::DIM)
    );
    if let Some(location) = &model.location {
        println!("      {}", style(file_link(&location.file, location.line)).fg(colors::DIM));
    }
    for property in &model.properties {
        property_line(property);
    }
    for template in &model.templates {
        println!(
            "      {} {}({}) prevalidates {}",
            style("template").fg(colors::VIOLET),
            template.function,
            style(format!("{:?}", template.scope).to_lowercase()).fg(colors::DIM),
            template.prevalidated.join(", ")
        );
    }
    println!();
}

fn property_line(property: &Property) {
    let failure = match &property.kind {
        PropertyKind::ValidatedValue(value) | PropertyKind::ValidatedValueOptional { value, .. } => {
            Some(value.failure.to_string())
        }
        _ => None,
    };
    println!(
        "      {:16} {:32}{}{}",
        property.name,
        style(property.kind.label()).fg(colors::VIOLET),
        if property.external { " external" } else { "" },
        failure
            .map(|f| format!(" {} {}", symbols::DOT, style(f).fg(colors::DIM)))
            .unwrap_or_default()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_link_format() {
        let link = file_link(Path::new("model/user.json"), 42);
        assert!(link.contains("model/user.json:42"));
        assert!(link.contains("\x1b]8;;"));
    }
}
