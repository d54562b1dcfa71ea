//! Plain-text renderings for the terminal.

use menu_core::{Catalog, Category, MenuLogEntry, Preview};

pub fn preview_table(preview: &Preview) -> String {
    if preview.is_empty() {
        return "(empty menu)\n".to_string();
    }
    let mut out = String::new();
    for row in &preview.rows {
        out.push_str(&format!("{:>2}. {}", row.number, row.dish_name));
        if !row.notes.is_empty() {
            out.push_str(&format!("  ({})", row.notes));
        }
        out.push_str(&format!("  [{}]\n", row.category.label()));
    }
    out
}

pub fn catalog_listing(category: Category, catalog: &Catalog) -> String {
    let mut out = format!("{} ({})\n", category.label(), category.key());
    for option in catalog.options() {
        out.push_str(&format!("  {option}\n"));
    }
    out
}

pub fn history_table(entries: &[MenuLogEntry]) -> String {
    if entries.is_empty() {
        return "(no saved menus)\n".to_string();
    }
    entries
        .iter()
        .map(|e| format!("{:>4}  {}  {}\n", e.id, e.at_date, e.dishes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::{Dish, PreviewRow};

    #[test]
    fn preview_lists_rows_with_notes() {
        let preview = Preview {
            rows: vec![PreviewRow {
                number: 1,
                category: Category::Soups,
                dish_name: "Soup".into(),
                notes: "hot".into(),
            }],
        };
        assert_eq!(preview_table(&preview), " 1. Soup  (hot)  [🍲 מרקים]\n");
    }

    #[test]
    fn catalog_listing_starts_with_sentinel() {
        let catalog = Catalog::new(vec![Dish {
            dish_name_hebrew: "Rice".into(),
            ..Default::default()
        }]);
        let listing = catalog_listing(Category::GrainsAndPasta, &catalog);
        assert!(listing.contains("  -\n  Rice\n"));
    }

    #[test]
    fn history_is_one_line_per_entry() {
        let entries = vec![
            MenuLogEntry::new(1, "a", "2024-01-01 12:00:00"),
            MenuLogEntry::new(2, "b", "2024-01-02 12:00:00"),
        ];
        assert_eq!(history_table(&entries).lines().count(), 2);
        assert_eq!(history_table(&[]), "(no saved menus)\n");
    }
}
