//! Integration tests for the convert_pdf() end-to-end pipeline.
//!
//! Uses a MockExtractor that returns pre-built PageItems without
//! invoking pdftotext, so these tests run without poppler-utils.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};

use calamine::{Data, Reader, Xlsx};
use pdfgrid_core::config::GridOptions;
use pdfgrid_core::error::GridError;
use pdfgrid_core::extraction::{PageItems, PdfExtractor, TextItem};
use pdfgrid_core::{convert_pdf, export_grid, reconstruct, Converter};

struct MockExtractor {
    pages: Vec<PageItems>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageItems>, GridError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

struct FailingExtractor;

impl PdfExtractor for FailingExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageItems>, GridError> {
        Err(GridError::Extraction("corrupt xref table".into()))
    }

    fn backend_name(&self) -> &str {
        "failing"
    }
}

/// Blocks inside its first extraction until the test thread lets it go.
struct GatedExtractor {
    gate_closed: AtomicBool,
    entered: Arc<Barrier>,
    release: Arc<Barrier>,
    pages: Vec<PageItems>,
}

impl PdfExtractor for GatedExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageItems>, GridError> {
        if self.gate_closed.swap(false, Ordering::SeqCst) {
            self.entered.wait();
            self.release.wait();
        }
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "gated"
    }
}

fn page(number: usize, items: &[(&str, f64, f64)]) -> PageItems {
    PageItems {
        page_number: number,
        items: items
            .iter()
            .map(|(text, x, y)| TextItem::at(*text, *x, *y))
            .collect(),
    }
}

fn invoice_pages() -> Vec<PageItems> {
    vec![
        page(
            1,
            &[
                ("Item", 50.2, 700.1),
                ("Qty", 250.0, 700.0),
                ("Price", 400.4, 699.2),
                ("Blue", 50.0, 680.0),
                ("widget", 66.0, 680.3),
                ("3", 255.0, 680.0),
                ("9.50", 402.0, 679.0),
                ("Red", 51.0, 660.0),
                ("gear", 64.0, 660.0),
                ("-", 252.0, 660.0),
                ("12.00", 401.0, 660.0),
            ],
        ),
        page(
            2,
            &[
                ("Total", 50.0, 700.0),
                ("  ", 250.0, 700.0),
                ("21.50", 400.0, 700.0),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Scenario 1: two merged columns, two rows
// ---------------------------------------------------------------------------
#[test]
fn scenario_two_by_two_grid() {
    let pages = vec![page(
        1,
        &[("A", 0.0, 100.0), ("B", 20.0, 100.0), ("X", 0.0, 50.0), ("Y", 22.0, 50.0)],
    )];

    let grid = reconstruct(&pages, &GridOptions::default()).unwrap();

    assert_eq!(grid.rows(), &[vec!["A", "B"], vec!["X", "Y"]]);
}

// ---------------------------------------------------------------------------
// Scenario 2: nothing to work with
// ---------------------------------------------------------------------------
#[test]
fn empty_document_reports_no_text() {
    let extractor = MockExtractor { pages: vec![] };
    let err = convert_pdf(&[], &extractor, &GridOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::NoTextFound));

    let blank = MockExtractor {
        pages: vec![page(1, &[(" ", 10.0, 10.0), ("\t", 40.0, 10.0)])],
    };
    let err = convert_pdf(&[], &blank, &GridOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::NoTextFound));
}

#[test]
fn failed_conversion_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table_export.xlsx");

    let converter = Converter::new(
        Box::new(MockExtractor { pages: vec![] }),
        GridOptions::default(),
    );
    assert!(matches!(
        converter.convert_to_file(&[], &out),
        Err(GridError::NoTextFound)
    ));
    assert!(!out.exists());

    let converter = Converter::new(Box::new(FailingExtractor), GridOptions::default());
    assert!(matches!(
        converter.convert_to_file(&[], &out),
        Err(GridError::Extraction(_))
    ));
    assert!(!out.exists());
}

// ---------------------------------------------------------------------------
// Scenario 3: one row, far-apart columns
// ---------------------------------------------------------------------------
#[test]
fn shared_baseline_becomes_single_row() {
    let pages = vec![page(
        1,
        &[("a", 0.0, 300.0), ("b", 100.0, 301.0), ("c", 250.0, 299.0), ("d", 500.0, 302.0)],
    )];

    let grid = reconstruct(&pages, &GridOptions::default()).unwrap();

    assert_eq!(grid.row_count(), 1);
    assert_eq!(grid.rows()[0], vec!["a", "b", "c", "d"]);
}

// ---------------------------------------------------------------------------
// Scenario 4: equidistant fragment goes to the leftmost column
// ---------------------------------------------------------------------------
#[test]
fn equidistant_fragment_lands_left() {
    // Rounded x-values 0, 19, 37, 46 cluster into centers [0, 37]; "mid"
    // sits at raw x 18.5, exactly 18.5 from both.
    let pages = vec![page(
        1,
        &[
            ("A", 0.0, 100.0),
            ("B", 37.0, 100.0),
            ("C", 46.0, 80.0),
            ("mid", 18.5, 60.0),
        ],
    )];

    let grid = reconstruct(&pages, &GridOptions::default()).unwrap();

    assert_eq!(
        grid.rows(),
        &[vec!["A", "B"], vec!["", "C"], vec!["mid", ""]]
    );
}

// ---------------------------------------------------------------------------
// Scenario 5: two pages, one row each
// ---------------------------------------------------------------------------
#[test]
fn pages_stack_in_ascending_order() {
    let pages = vec![page(2, &[("second", 0.0, 700.0)]), page(1, &[("first", 0.0, 100.0)])];

    let grid = reconstruct(&pages, &GridOptions::default()).unwrap();

    assert_eq!(grid.rows(), &[vec!["first"], vec!["second"]]);
}

#[test]
fn multi_page_table_reconstructs() {
    let grid = reconstruct(&invoice_pages(), &GridOptions::default()).unwrap();

    assert_eq!(
        grid.rows(),
        &[
            vec!["Item", "Qty", "Price"],
            vec!["Blue widget", "3", "9.50"],
            vec!["Red gear", "-", "12.00"],
            vec!["Total", "", "21.50"],
        ]
    );
}

#[test]
fn pipeline_is_deterministic() {
    let extractor = MockExtractor {
        pages: invoice_pages(),
    };
    let first = convert_pdf(b"%PDF", &extractor, &GridOptions::default()).unwrap();
    let second = convert_pdf(b"%PDF", &extractor, &GridOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn extraction_failure_propagates() {
    let err = convert_pdf(&[], &FailingExtractor, &GridOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::Extraction(_)));
}

#[test]
fn overlapping_conversion_is_rejected() {
    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let converter = Converter::new(
        Box::new(GatedExtractor {
            gate_closed: AtomicBool::new(true),
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
            pages: invoice_pages(),
        }),
        GridOptions::default(),
    );

    std::thread::scope(|s| {
        let first = s.spawn(|| converter.convert(b"%PDF"));
        // Wait until the first conversion is inside extraction.
        entered.wait();
        assert!(matches!(converter.convert(b"%PDF"), Err(GridError::Busy)));
        release.wait();
        assert_eq!(first.join().unwrap().unwrap().row_count(), 4);
    });

    // The guard is released once the first conversion finishes.
    assert_eq!(converter.convert(b"%PDF").unwrap().row_count(), 4);
}

#[test]
fn exported_workbook_holds_grid_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("table_export.xlsx");
    let options = GridOptions {
        sheet_name: "Invoice".into(),
        ..GridOptions::default()
    };
    let grid = reconstruct(&invoice_pages(), &options).unwrap();

    export_grid(&grid, &options, &out).unwrap();

    let mut workbook: Xlsx<_> = calamine::open_workbook(&out).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Invoice"]);
    let range = workbook.worksheet_range("Invoice").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Item".into())));
    assert_eq!(
        range.get_value((1, 0)),
        Some(&Data::String("Blue widget".into()))
    );
    assert_eq!(range.get_value((3, 2)), Some(&Data::String("21.50".into())));
    assert!(matches!(range.get_value((3, 1)), None | Some(Data::Empty)));
}
