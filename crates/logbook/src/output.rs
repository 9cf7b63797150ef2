use std::io::IsTerminal;

use chrono::SecondsFormat;
use logbook_core::model::{LogLevel, LogRecord};
use owo_colors::OwoColorize;

pub fn print_logs_human(logs: &[LogRecord]) {
    let color = std::io::stdout().is_terminal();
    for record in logs {
        println!("{}", format_record(record, color));
    }
    println!("-- {} logs --", logs.len());
}

pub fn print_record_human(record: &LogRecord) {
    println!(
        "{}",
        format_record(record, std::io::stdout().is_terminal())
    );
    println!("id={}", record.id);
}

fn format_record(record: &LogRecord, color: bool) -> String {
    let ts = record
        .timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let level = record.log_level.map(LogLevel::as_str).unwrap_or("-");
    let level = if color {
        colored_level(record.log_level, level)
    } else {
        level.to_string()
    };
    let service = if color {
        record.service_name.cyan().to_string()
    } else {
        record.service_name.clone()
    };
    let trace = record.trace_id.as_deref().unwrap_or("-");
    let span = record.span_id.as_deref().unwrap_or("-");

    let mut line = format!(
        "{ts} {service} {level} trace={trace} span={span} | {}",
        record.message
    );
    if record.metadata.as_object().is_none_or(|m| !m.is_empty()) {
        line.push(' ');
        line.push_str(&record.metadata.to_string());
    }
    line
}

fn colored_level(level: Option<LogLevel>, label: &str) -> String {
    match level {
        Some(LogLevel::Debug) => label.bright_black().to_string(),
        Some(LogLevel::Info) => label.green().to_string(),
        Some(LogLevel::Warn) => label.yellow().to_string(),
        Some(LogLevel::Error) => label.red().to_string(),
        Some(LogLevel::Fatal) => label.magenta().to_string(),
        None => label.to_string(),
    }
}
