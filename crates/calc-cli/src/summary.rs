use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use calc_core::{CalculatorMode, CapabilitySettings, keys};
use calc_input::{Binding, Effect, IgnoreReason, NoticeKind};
use calc_settings::SettingsSnapshot;

use crate::commands::RunOutcome;
use calc_cli::session::Step;

pub fn print_run(outcome: &RunOutcome, trace: bool) {
    if trace && !outcome.steps.is_empty() {
        println!("{}", trace_table(&outcome.steps));
    }
    println!("{}", state_table(outcome));
    let rejected: Vec<&Step> = outcome
        .steps
        .iter()
        .filter(|step| step.dispatch.notice().is_some())
        .collect();
    if !rejected.is_empty() && !trace {
        eprintln!("Rejected keys:");
        for step in rejected {
            if let Some(notice) = step.dispatch.notice() {
                eprintln!("- {}: {notice}", step.key);
            }
        }
    }
}

pub fn print_bindings(mode: CalculatorMode, bindings: &[Binding], settings: &SettingsSnapshot) {
    println!("Mode: {mode}");
    println!("{}", bindings_table(mode, bindings, settings));
}

pub fn print_settings(source: &str, settings: &SettingsSnapshot) {
    println!("Source: {source}");
    let enabled = if settings.calculator_enabled {
        "enabled"
    } else {
        "disabled"
    };
    println!("Calculator: {enabled}");
    println!("{}", settings_table(settings));
}

fn state_table(outcome: &RunOutcome) -> Table {
    let state = &outcome.state;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Display"),
        Cell::new(&state.display)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("History"), text_or_dash(&state.history)]);
    table.add_row(vec![
        Cell::new("Pending"),
        match (state.previous_value, state.operation) {
            (Some(previous), Some(op)) => Cell::new(format!("{} {op}", state.render(previous))),
            _ => dim_cell("-"),
        },
    ]);
    table.add_row(vec![
        Cell::new("Memory"),
        Cell::new(state.render(state.memory)),
    ]);
    table.add_row(vec![Cell::new("Mode"), Cell::new(outcome.mode)]);
    table.add_row(vec![Cell::new("Angle"), Cell::new(state.angle_mode)]);
    if outcome.mode == CalculatorMode::Programmer {
        table.add_row(vec![Cell::new("Word size"), Cell::new(state.word_size)]);
        table.add_row(vec![Cell::new("Base"), Cell::new(state.base_mode)]);
    }
    table
}

fn trace_table(steps: &[Step]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Key"),
        header_cell("Outcome"),
        header_cell("Display"),
    ]);
    apply_trace_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (index, step) in steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&step.key).add_attribute(Attribute::Bold),
            outcome_cell(step),
            Cell::new(&step.display),
        ]);
    }
    table
}

fn bindings_table(mode: CalculatorMode, bindings: &[Binding], settings: &SettingsSnapshot) -> Table {
    let capabilities = &settings.capabilities;
    let mode_enabled = capabilities.is_enabled(mode.capability_key());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Action"),
        header_cell("Requires"),
        header_cell("Available"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for binding in bindings {
        let requires = if binding.capabilities.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(binding.capabilities.join(", "))
        };
        let blocked = if mode_enabled {
            capabilities.first_disabled(&binding.capabilities)
        } else {
            Some(mode.capability_key())
        };
        table.add_row(vec![
            Cell::new(binding.shortcut)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(binding.description),
            requires,
            availability_cell(blocked),
        ]);
    }
    table
}

fn settings_table(settings: &SettingsSnapshot) -> Table {
    let capabilities = &settings.capabilities;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Capability"),
        header_cell("Enabled"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for (key, enabled) in settings.effective_flags() {
        table.add_row(vec![
            Cell::new(key),
            flag_cell(enabled),
            source_cell(capabilities, key),
        ]);
    }
    for (key, enabled) in capabilities.iter() {
        if keys::ALL.contains(&key) {
            continue;
        }
        table.add_row(vec![
            Cell::new(key).fg(Color::DarkGrey),
            flag_cell(enabled),
            Cell::new("unknown key").fg(Color::Yellow),
        ]);
    }
    table
}

fn outcome_cell(step: &Step) -> Cell {
    let text = step.outcome();
    match &step.dispatch.effect {
        Effect::Applied(_) => Cell::new(text).fg(Color::Green),
        Effect::Rejected(notice) => match notice.kind {
            NoticeKind::Error => Cell::new(text).fg(Color::Red),
            NoticeKind::Warning => Cell::new(text).fg(Color::Yellow),
            NoticeKind::Info => Cell::new(text),
        },
        Effect::Ignored(IgnoreReason::Debounced | IgnoreReason::Unbound) | Effect::PassThrough => {
            dim_cell(text)
        }
    }
}

fn availability_cell(blocked: Option<&str>) -> Cell {
    match blocked {
        None => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(key) => Cell::new(format!("✗ {key}")).fg(Color::Red),
    }
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn source_cell(capabilities: &CapabilitySettings, key: &str) -> Cell {
    if capabilities.iter().any(|(set, _)| set == key) {
        Cell::new("settings file")
    } else {
        dim_cell("default")
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_trace_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn text_or_dash(text: &str) -> Cell {
    if text.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(text)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
