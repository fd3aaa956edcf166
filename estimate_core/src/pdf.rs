//! # Estimate Document
//!
//! Renders a project's cost estimate to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Project data is injected via placeholder replacement before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::currency::CurrencyStyle;
//! use estimate_core::pdf::render_estimate_pdf;
//! use estimate_core::project::ProjectData;
//! use estimate_core::rooms::RoomType;
//!
//! let mut project = ProjectData::default();
//! let room = project.new_room(RoomType::Living, "floor-1");
//! project.add_room(room).unwrap();
//!
//! let pdf_bytes = render_estimate_pdf(&project, &CurrencyStyle::default()).unwrap();
//! std::fs::write("construction-estimate.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::currency::CurrencyStyle;
use crate::errors::{EstimateError, EstimateResult};
use crate::project::ProjectData;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), now.month() as u8, now.day() as u8)
    }
}

// ============================================================================
// Template
// ============================================================================

/// Footer printed on every estimate
pub const FOOTER_TEXT: &str = "Generated with Construction Cost Estimator";

/// Typst template for the estimate document
const ESTIMATE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 2cm, right: 2cm),
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, auto),
      align(left)[#text(size: 8pt, fill: gray)[{{FOOTER}}]],
      align(right)[#text(size: 8pt, fill: gray)[Page #counter(page).display()]],
    )
  ]
)

#set text(size: 10pt)

#align(center)[
  #text(size: 20pt, weight: "bold")[CONSTRUCTION ESTIMATE]
]

#v(8pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Details*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 2pt,
      [Date:], [{{ISSUED}}],
      [Due Date:], [{{DUE}}],
      [Total Area:], [{{TOTAL_AREA}} m#super[2]],
      [Number of Rooms:], [{{ROOM_COUNT}}],
    )
  ],
  [
    *Client Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 2pt,
      [Name:], [{{CLIENT_NAME}}],
      [Address:], [{{CLIENT_ADDRESS}}],
      [Email:], [{{CLIENT_EMAIL}}],
      [Phone:], [{{CLIENT_PHONE}}],
    )
  ]
)

#v(12pt)

== Floors

#table(
  columns: (1fr, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right),
  table.header([*Floor*], [*Rooms*], [*Area (m#super[2])*]),
{{FLOOR_ROWS}}
)

#v(12pt)

== Materials

#table(
  columns: (1fr, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header([*Item*], [*Quantity*], [*Unit Cost*], [*Subtotal*]),
{{MATERIAL_ROWS}}
)

#v(12pt)

== Labor

#table(
  columns: (1fr, auto, auto, auto),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header([*Description*], [*Hours*], [*Rate*], [*Subtotal*]),
{{LABOR_ROWS}}
)

#v(12pt)

== Summary

#align(right)[
  #table(
    columns: (auto, auto),
    stroke: none,
    align: (left, right),
    [Materials Subtotal:], [{{MATERIALS_SUBTOTAL}}],
    [Labor Subtotal:], [{{LABOR_SUBTOTAL}}],
    [Subtotal:], [{{SUBTOTAL}}],
    [Tax ({{TAX_PERCENT}}%):], [{{TAX_AMOUNT}}],
    [Discount ({{DISCOUNT_PERCENT}}%):], [{{DISCOUNT_AMOUNT}}],
    table.hline(stroke: 0.5pt),
    [*Total:*], [#text(size: 12pt, weight: "bold", fill: rgb("#003399"))[{{TOTAL}}]],
  )
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Build the Typst source for a project's estimate, dated `issued`.
pub fn estimate_document_source(project: &ProjectData, currency: &CurrencyStyle, issued: NaiveDate) -> String {
    let summary = project.cost_summary();
    let money = |amount: f64| escape_typst(&currency.format(amount));

    ESTIMATE_TEMPLATE
        .replace("{{FOOTER}}", FOOTER_TEXT)
        .replace("{{ISSUED}}", &format_date(issued))
        .replace("{{DUE}}", &format_date(project.due_date))
        .replace("{{TOTAL_AREA}}", &format!("{:.1}", project.total_area().value()))
        .replace("{{ROOM_COUNT}}", &project.rooms.len().to_string())
        .replace("{{CLIENT_NAME}}", &or_na(&project.client.name))
        .replace("{{CLIENT_ADDRESS}}", &or_na(&project.client.address))
        .replace("{{CLIENT_EMAIL}}", &or_na(&project.client.email))
        .replace("{{CLIENT_PHONE}}", &or_na(&project.client.phone))
        .replace("{{FLOOR_ROWS}}", &build_floor_rows(project))
        .replace("{{MATERIAL_ROWS}}", &build_material_rows(project, currency))
        .replace("{{LABOR_ROWS}}", &build_labor_rows(project, currency))
        .replace("{{MATERIALS_SUBTOTAL}}", &money(summary.materials_subtotal))
        .replace("{{LABOR_SUBTOTAL}}", &money(summary.labor_subtotal))
        .replace("{{SUBTOTAL}}", &money(summary.subtotal))
        .replace("{{TAX_PERCENT}}", &format_number(project.tax_percent))
        .replace("{{TAX_AMOUNT}}", &money(summary.tax_amount))
        .replace("{{DISCOUNT_PERCENT}}", &format_number(project.discount_percent))
        .replace("{{DISCOUNT_AMOUNT}}", &money(-summary.discount_amount))
        .replace("{{TOTAL}}", &money(summary.total))
}

/// Render the estimate for `project`, dated today.
pub fn render_estimate_pdf(project: &ProjectData, currency: &CurrencyStyle) -> EstimateResult<Vec<u8>> {
    render_estimate_pdf_on(project, currency, Utc::now().date_naive())
}

/// Render the estimate for `project`, dated `issued`.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(EstimateError::RenderFailed)` - If Typst compilation or PDF export fails
pub fn render_estimate_pdf_on(project: &ProjectData, currency: &CurrencyStyle, issued: NaiveDate) -> EstimateResult<Vec<u8>> {
    let source = estimate_document_source(project, currency, issued);
    compile_pdf(source)
}

fn compile_pdf(source: String) -> EstimateResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    for warning in &warned.warnings {
        debug!("typst warning: {}", warning.message);
    }

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::render_failed("compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::render_failed("pdf export", error_msgs.join("; "))
    })?;

    debug!(bytes = pdf_bytes.len(), "estimate rendered");
    Ok(pdf_bytes)
}

/// Escape special Typst markup characters in user-provided text
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '=' | '-' | '+' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn or_na(s: &str) -> String {
    if s.trim().is_empty() {
        "N/A".to_string()
    } else {
        escape_typst(s)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Whole numbers without decimals, everything else with up to two
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn build_floor_rows(project: &ProjectData) -> String {
    let mut floors: Vec<_> = project.floors.iter().collect();
    floors.sort_by_key(|f| f.level);
    floors
        .iter()
        .map(|floor| {
            format!(
                "  [{}], [{}], [{:.1}],",
                escape_typst(&floor.name),
                project.rooms_on_floor(&floor.id).count(),
                project.floor_area(&floor.id).value()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_material_rows(project: &ProjectData, currency: &CurrencyStyle) -> String {
    project
        .materials
        .iter()
        .map(|m| {
            format!(
                "  [{}], [{} {}], [{}], [{}],",
                escape_typst(&m.name),
                format_number(m.quantity),
                escape_typst(&m.unit),
                escape_typst(&currency.format(m.unit_cost)),
                escape_typst(&currency.format(m.line_total()))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_labor_rows(project: &ProjectData, currency: &CurrencyStyle) -> String {
    project
        .labor
        .iter()
        .map(|l| {
            format!(
                "  [{}], [{}], [{}\\/hr], [{}],",
                escape_typst(&l.description),
                format_number(l.hours),
                escape_typst(&currency.format(l.rate)),
                escape_typst(&currency.format(l.line_total()))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ClientInfoUpdate, GROUND_FLOOR_ID};
    use crate::rooms::RoomType;

    fn sample_project() -> ProjectData {
        let mut project = ProjectData::default();
        let room = project.new_room(RoomType::Bedroom, GROUND_FLOOR_ID);
        project.add_room(room).unwrap();
        project.populate_default_labor();
        project.set_due_date(NaiveDate::from_ymd_opt(2026, 11, 17).unwrap());
        project
    }

    #[test]
    fn test_source_contains_sections() {
        let project = sample_project();
        let issued = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let source = estimate_document_source(&project, &CurrencyStyle::default(), issued);

        assert!(source.contains("CONSTRUCTION ESTIMATE"));
        assert!(source.contains("[October 18, 2026]"));
        assert!(source.contains("[November 17, 2026]"));
        assert!(source.contains("[12.0 m#super[2]]"));
        assert!(source.contains("[Name:], [N/A]"));
        assert!(source.contains("[Bricks], [960 pieces]"));
        assert!(source.contains("[Masonry Work], [24], [₱20.00\\/hr], [₱480.00]"));
        assert!(source.contains("[Tax (10%):]"));
        assert!(source.contains(FOOTER_TEXT));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_client_text_is_escaped() {
        let mut project = sample_project();
        project.update_client_info(&ClientInfoUpdate {
            name: Some("Santos #1 [VIP]".into()),
            email: Some("a_b@example.com".into()),
            ..Default::default()
        });
        let source = estimate_document_source(&project, &CurrencyStyle::default(), Utc::now().date_naive());
        assert!(source.contains("Santos \\#1 \\[VIP\\]"));
        assert!(source.contains("a\\_b\\@example.com"));
    }

    #[test]
    fn test_discount_shown_negative() {
        let mut project = sample_project();
        project.set_discount(20.0).unwrap();
        let style = CurrencyStyle {
            code: "USD".into(),
            symbol: "$".into(),
            decimals: 2,
        };
        let source = estimate_document_source(&project, &style, Utc::now().date_naive());
        assert!(source.contains("[Discount (20%):], [\\-\\$"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(7.126), "7.13");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_pdf_generation() {
        let project = sample_project();
        let pdf = render_estimate_pdf(&project, &CurrencyStyle::default());

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_pdf_generation_empty_project() {
        let pdf = render_estimate_pdf(&ProjectData::default(), &CurrencyStyle::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
}
