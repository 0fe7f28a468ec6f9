use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lts_engine::{
    Binding, ConfidenceLevel, DocumentAnalysis, MappingRegistry, Placeholder, SuggestionEngine,
    TemplateFamily, ValidationResult,
};

pub fn placeholder_table(placeholders: &[Placeholder]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Offset"),
        header_cell("Length"),
        header_cell("Blank"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for placeholder in placeholders {
        table.add_row(vec![
            Cell::new(placeholder.order),
            dim_cell(&placeholder.id),
            Cell::new(placeholder.position),
            Cell::new(placeholder.length),
            Cell::new(&placeholder.original_text),
        ]);
    }
    table
}

pub fn suggestion_table(analysis: &DocumentAnalysis, engine: &SuggestionEngine) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Variable"),
        header_cell("Category"),
        header_cell("Confidence"),
        header_cell("Reason"),
        header_cell("Context"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for suggestion in &analysis.suggestions {
        let level = engine.level(suggestion);
        table.add_row(vec![
            Cell::new(&suggestion.original_text),
            Cell::new(&suggestion.variable_name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(suggestion.category),
            confidence_cell(suggestion.confidence, level),
            Cell::new(&suggestion.reason),
            dim_cell(&suggestion.context_preview),
        ]);
    }
    table
}

pub fn classification_table(matches: &[(TemplateFamily, &str)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Family"),
        header_cell("Label"),
        header_cell("Signature"),
    ]);
    apply_table_style(&mut table);
    for (family, signature) in matches {
        table.add_row(vec![
            Cell::new(family.key()).fg(Color::Blue),
            Cell::new(family.label()),
            Cell::new(format!("\"{signature}\"")),
        ]);
    }
    table
}

pub fn binding_table(bindings: &[Binding]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Description"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for binding in bindings {
        let field = match binding.field.as_ref() {
            Some(field) => Cell::new(field.key().unwrap_or("(calculated)")),
            None => dim_cell("-"),
        };
        let value = if binding.missing {
            Cell::new(&binding.value).fg(Color::Red)
        } else {
            Cell::new(&binding.value).fg(Color::Green)
        };
        table.add_row(vec![
            Cell::new(binding.order),
            field,
            Cell::new(&binding.description),
            value,
        ]);
    }
    table
}

pub fn family_table(registry: &MappingRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Family"),
        header_cell("#"),
        header_cell("Description"),
        header_cell("Field"),
        header_cell("Category"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for family in registry.families() {
        for (idx, mapping) in registry.table(family).iter().enumerate() {
            let family_cell = if idx == 0 {
                Cell::new(family.key())
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                family_cell,
                Cell::new(mapping.order),
                Cell::new(&mapping.description),
                match mapping.field.key() {
                    Some(key) => Cell::new(key),
                    None => dim_cell("(calculated)"),
                },
                Cell::new(mapping.category),
            ]);
        }
    }
    table
}

/// One row per unfilled placeholder or unmapped variable; `None` when valid.
pub fn validation_table(result: &ValidationResult) -> Option<Table> {
    if result.is_valid {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Name")]);
    apply_table_style(&mut table);
    for field in &result.missing_fields {
        table.add_row(vec![
            Cell::new("unfilled").fg(Color::Red),
            Cell::new(field),
        ]);
    }
    for variable in &result.unmapped_variables {
        table.add_row(vec![
            Cell::new("no value").fg(Color::Yellow),
            Cell::new(format!("{{{{{variable}}}}}")),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: f32, level: ConfidenceLevel) -> Cell {
    let cell = Cell::new(format!("{confidence:.2} {}", level.as_str()));
    match level {
        ConfidenceLevel::High => cell.fg(Color::Green),
        ConfidenceLevel::Medium => cell.fg(Color::Yellow),
        ConfidenceLevel::Low => cell.fg(Color::DarkGrey),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lts_engine::tag;

    #[test]
    fn one_row_per_placeholder() {
        let doc = tag("A ..... B _____");
        assert_eq!(placeholder_table(&doc.placeholders).row_count(), 2);
    }

    #[test]
    fn valid_results_have_no_table() {
        let result = ValidationResult {
            is_valid: true,
            ..ValidationResult::default()
        };
        assert!(validation_table(&result).is_none());

        let result = ValidationResult {
            is_valid: false,
            missing_fields: vec!["Landlord Name".to_string()],
            found_variables: vec!["rent".to_string()],
            unmapped_variables: vec!["rent".to_string()],
        };
        let table = validation_table(&result).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn families_list_every_mapping() {
        let registry = MappingRegistry::builtin();
        let expected: usize = registry
            .families()
            .map(|family| registry.table(family).len())
            .sum();
        assert_eq!(family_table(registry).row_count(), expected);
    }
}
