//! Output formatting for a harvested catalog (table, JSON, markdown, CSV).

use crate::catalog::{Catalog, ProductRecord};
use crate::config::OutputFormat;

/// Placeholder shown for missing fields in human-readable formats.
const MISSING: &str = "N/A";

/// Formats catalogs for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats every record of the catalog, one row per product.
    pub fn format_catalog(&self, catalog: &Catalog) -> String {
        let records = &catalog.records;
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(catalog),
            OutputFormat::Markdown => self.markdown_records(records),
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    // JSON formatting

    fn json_records(&self, records: &[ProductRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_records(&self, catalog: &Catalog) -> String {
        let name_width = 32;
        let category_width = 16;
        let section_width = 24;
        let dimensions_width = 20;
        let description_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<name_width$}  {:<category_width$}  {:<section_width$}  {:<dimensions_width$}  {}",
            "Name", "Category", "Section", "Dimensions", "Description"
        ));
        lines.push(format!(
            "{:-<name_width$}  {:-<category_width$}  {:-<section_width$}  {:-<dimensions_width$}  {:-<description_width$}",
            "", "", "", "", ""
        ));

        for record in &catalog.records {
            lines.push(format!(
                "{:<name_width$}  {:<category_width$}  {:<section_width$}  {:<dimensions_width$}  {}",
                truncate(or_missing(&record.name), name_width),
                truncate(or_missing(&record.category), category_width),
                truncate(or_missing(&record.section), section_width),
                truncate(or_missing(&record.dimensions), dimensions_width),
                truncate(or_missing(&record.description), description_width),
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} products from {} pages",
            catalog.len(),
            catalog.pages_fetched
        ));
        if let Some(stop) = &catalog.stop {
            lines.push(format!("Stopped early: {}", stop));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Name | Category | Section | Description | Dimensions | Image |".to_string());
        lines.push("|------|----------|---------|-------------|------------|-------|".to_string());

        for record in records {
            let image = match &record.image_url {
                Some(url) => format!("[image]({})", url),
                None => String::new(),
            };

            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                Self::markdown_escape(or_missing(&record.name)),
                Self::markdown_escape(or_missing(&record.category)),
                Self::markdown_escape(or_missing(&record.section)),
                Self::markdown_escape(&truncate(or_missing(&record.description), 60)),
                Self::markdown_escape(or_missing(&record.dimensions)),
                image
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", records.len()));

        lines.join("\n")
    }

    fn markdown_escape(s: &str) -> String {
        s.replace('|', "\\|")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        ProductRecord::COLUMNS.join(",")
    }

    fn csv_records(&self, records: &[ProductRecord]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for record in records {
            let row: Vec<String> = record
                .fields()
                .into_iter()
                .map(|f| f.map(Self::csv_escape).unwrap_or_default())
                .collect();
            lines.push(row.join(","));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn or_missing(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(MISSING)
}

/// Shortens `s` to at most `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StopReason;

    fn make_record() -> ProductRecord {
        ProductRecord {
            name: Some("Silla Thonet".to_string()),
            category: Some("Sillas".to_string()),
            section: Some("Mobiliario".to_string()),
            description: Some("Silla de madera curvada, estilo café".to_string()),
            dimensions: Some("Alto 90 cm".to_string()),
            image_url: Some("https://atrezzovazquez.es/images/silla.jpg".to_string()),
        }
    }

    fn make_sparse_record() -> ProductRecord {
        ProductRecord { name: Some("Baúl".to_string()), ..Default::default() }
    }

    fn make_catalog(records: Vec<ProductRecord>) -> Catalog {
        let mut catalog = Catalog::new();
        catalog.push_page(records);
        catalog
    }

    #[test]
    fn test_json_records() {
        let formatter = Formatter::new(OutputFormat::Json);
        let output = formatter.format_catalog(&make_catalog(vec![make_record(), make_sparse_record()]));

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));

        let parsed: Vec<ProductRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], make_record());
        assert!(parsed[1].image_url.is_none());
        assert!(output.contains("\"category\": null"));
    }

    #[test]
    fn test_json_empty() {
        let formatter = Formatter::new(OutputFormat::Json);
        assert_eq!(formatter.format_catalog(&Catalog::new()), "[]");
    }

    #[test]
    fn test_table_records() {
        let formatter = Formatter::new(OutputFormat::Table);
        let output = formatter.format_catalog(&make_catalog(vec![make_record(), make_sparse_record()]));

        assert!(output.contains("Name"));
        assert!(output.contains("Category"));
        assert!(output.contains("Dimensions"));
        assert!(output.contains("Silla Thonet"));
        assert!(output.contains("Baúl"));
        assert!(output.contains("N/A"));
        assert!(output.contains("Total: 2 products from 1 pages"));
        assert!(!output.contains("Stopped early"));
    }

    #[test]
    fn test_table_reports_stop_reason() {
        let formatter = Formatter::new(OutputFormat::Table);
        let mut catalog = make_catalog(vec![make_record()]);
        catalog.stop = Some(StopReason::Status { page: 2, status: 404 });

        let output = formatter.format_catalog(&catalog);
        assert!(output.contains("Stopped early: page 2 returned status 404"));
    }

    #[test]
    fn test_table_empty() {
        let formatter = Formatter::new(OutputFormat::Table);
        assert_eq!(formatter.format_catalog(&Catalog::new()), "No products found.");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("ñññññññññññ", 6), "ñññ...");
        assert_eq!(truncate("abcdef", 6), "abcdef");
    }

    #[test]
    fn test_markdown_records() {
        let formatter = Formatter::new(OutputFormat::Markdown);
        let mut record = make_record();
        record.section = Some("Mobiliario | Sillas".to_string());
        let output = formatter.format_catalog(&make_catalog(vec![record, make_sparse_record()]));

        assert!(output.starts_with("| Name | Category |"));
        assert!(output.contains("Mobiliario \\| Sillas"));
        assert!(output.contains("[image](https://atrezzovazquez.es/images/silla.jpg)"));
        assert!(output.contains("*2 products found*"));
    }

    #[test]
    fn test_csv_records() {
        let formatter = Formatter::new(OutputFormat::Csv);
        let output = formatter.format_catalog(&make_catalog(vec![make_record(), make_sparse_record()]));
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "name,category,section,description,dimensions,image_url");
        assert_eq!(
            lines[1],
            "Silla Thonet,Sillas,Mobiliario,\"Silla de madera curvada, estilo café\",Alto 90 cm,https://atrezzovazquez.es/images/silla.jpg"
        );
        assert_eq!(lines[2], "Baúl,,,,,");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("plain"), "plain");
        assert_eq!(Formatter::csv_escape("a,b"), "\"a,b\"");
        assert_eq!(Formatter::csv_escape("30\" pantalla"), "\"30\"\" pantalla\"");
        assert_eq!(Formatter::csv_escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_csv_empty_is_header_only() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(
            formatter.format_catalog(&Catalog::new()),
            "name,category,section,description,dimensions,image_url"
        );
    }
}
