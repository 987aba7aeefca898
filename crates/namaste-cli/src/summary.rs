use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use namaste_model::{
    ConceptMapGroups, Equivalence, MappingCandidate, MappingValidation, Recommendation,
    TerminologyEntry,
};
use namaste_cli::bundle::BundleCheck;
use namaste_standards::{DoctorReport, Hierarchy};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn print_candidates(results: &[MappingCandidate]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Display"),
        header_cell("System"),
        header_cell("Equivalence"),
        header_cell("Confidence"),
        header_cell("Method"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(12)),
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
    ]);
    align_column(&mut table, 4, CellAlignment::Right);
    for candidate in results {
        table.add_row(vec![
            Cell::new(&candidate.target.code).add_attribute(Attribute::Bold),
            Cell::new(&candidate.target.display),
            Cell::new(candidate.target.system),
            equivalence_cell(candidate.equivalence),
            Cell::new(format!("{:.2}", candidate.confidence)),
            Cell::new(candidate.method),
        ]);
    }
    println!("{table}");
}

pub fn print_validation(validation: &MappingValidation) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Source"), entry_label(&validation.source)]);
    table.add_row(vec![header_cell("Target"), entry_label(&validation.target)]);
    table.add_row(vec![header_cell("Valid"), flag_cell(validation.valid)]);
    table.add_row(vec![
        header_cell("Confidence"),
        Cell::new(format!("{:.2}", validation.confidence)),
    ]);
    table.add_row(vec![
        header_cell("Equivalence"),
        equivalence_cell(validation.equivalence),
    ]);
    table.add_row(vec![header_cell("Method"), Cell::new(validation.method)]);
    table.add_row(vec![
        header_cell("Recommendation"),
        recommendation_cell(validation.recommendation),
    ]);
    println!("{table}");
}

pub fn print_entries(entries: &[TerminologyEntry]) {
    let with_tags = entries.iter().any(|entry| entry.tradition.is_some());
    let mut header = vec![
        header_cell("Code"),
        header_cell("Display"),
        header_cell("Definition"),
    ];
    if with_tags {
        header.push(header_cell("Tradition"));
        header.push(header_cell("Category"));
    }
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    for entry in entries {
        let mut row = vec![
            Cell::new(&entry.code).add_attribute(Attribute::Bold),
            Cell::new(&entry.display),
            Cell::new(&entry.definition),
        ];
        if with_tags {
            row.push(optional_cell(entry.tradition.as_deref()));
            row.push(optional_cell(entry.category.as_deref()));
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_concept_map_summary(groups: &ConceptMapGroups) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("URI"),
        header_cell("Elements"),
        header_cell("Targets"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for (system, group) in groups.iter() {
        table.add_row(vec![
            Cell::new(system).add_attribute(Attribute::Bold),
            Cell::new(&group.target),
            Cell::new(group.element.len()),
            Cell::new(group.target_count()),
        ]);
    }
    println!("{table}");
}

pub fn print_hierarchy(hierarchy: &Hierarchy) {
    let code = &hierarchy.code;
    println!("{} {} ({})", code.system, code.code, code.display);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Relation"),
        header_cell("Code"),
        header_cell("Display"),
    ]);
    apply_table_style(&mut table);
    for parent in &hierarchy.parents {
        let code = match &parent.code {
            Some(code) => Cell::new(code).add_attribute(Attribute::Bold),
            None => Cell::new(&parent.uri).fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new("parent"),
            code,
            optional_cell(parent.entry.as_ref().map(|entry| entry.display.as_str())),
        ]);
    }
    for child in &hierarchy.children {
        table.add_row(vec![
            Cell::new("child"),
            Cell::new(&child.code).add_attribute(Attribute::Bold),
            Cell::new(&child.display),
        ]);
    }
    if hierarchy.parents.is_empty() && hierarchy.is_leaf() {
        println!("No parents or children");
    } else {
        println!("{table}");
    }
}

pub fn print_bundle_check(check: &BundleCheck) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Condition"),
        header_cell("NAMASTE"),
        header_cell("ICD-11"),
        header_cell("Dual coded"),
    ]);
    apply_table_style(&mut table);
    for condition in &check.conditions {
        table.add_row(vec![
            Cell::new(&condition.id).add_attribute(Attribute::Bold),
            flag_cell(condition.has_namaste),
            flag_cell(condition.has_icd11),
            flag_cell(condition.dual_coded()),
        ]);
    }
    println!("{table}");
    for issue in check.issues() {
        println!("warning: {issue}");
    }
    println!(
        "{} of {} conditions dual coded",
        check.conditions.iter().filter(|c| c.dual_coded()).count(),
        check.conditions.len()
    );
}

pub fn print_doctor(report: &DoctorReport) {
    println!(
        "Pins: namaste {} / icd11 {} / predefined mappings {}",
        report.pins.namaste, report.pins.icd11, report.predefined_version
    );
    let mut files = Table::new();
    files.set_header(vec![
        header_cell("File"),
        header_cell("Role"),
        header_cell("SHA-256"),
    ]);
    apply_table_style(&mut files);
    for file in &report.files {
        files.add_row(vec![
            Cell::new(&file.path),
            Cell::new(file.role),
            Cell::new(&file.sha256).fg(Color::DarkGrey),
        ]);
    }
    println!("{files}");

    let counts = &report.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Terminology"), header_cell("Concepts")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("NAMASTE"), Cell::new(counts.namaste_concepts)]);
    table.add_row(vec![Cell::new("ICD-11 TM2"), Cell::new(counts.tm2_concepts)]);
    table.add_row(vec![
        Cell::new("ICD-11 Biomedicine"),
        Cell::new(counts.biomedicine_concepts),
    ]);
    table.add_row(vec![
        Cell::new("Predefined mappings"),
        Cell::new(counts.predefined_mappings),
    ]);
    println!("{table}");
    println!("OK: {} files verified", counts.files);
}

fn entry_label(entry: &TerminologyEntry) -> Cell {
    Cell::new(format!("{} {} ({})", entry.system, entry.code, entry.display))
}

fn equivalence_cell(equivalence: Equivalence) -> Cell {
    let color = match equivalence {
        Equivalence::Equivalent => Color::Green,
        Equivalence::Wider | Equivalence::Narrower => Color::Yellow,
        Equivalence::Related => Color::DarkGrey,
    };
    Cell::new(equivalence).fg(color)
}

fn recommendation_cell(recommendation: Recommendation) -> Cell {
    let color = match recommendation {
        Recommendation::Accept => Color::Green,
        Recommendation::Review => Color::Yellow,
        Recommendation::Reject => Color::Red,
    };
    Cell::new(recommendation)
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
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
