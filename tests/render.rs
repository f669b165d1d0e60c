use label_gen::layout::{LayoutConfig, Margins};
use label_gen::pagesize::PageSize;
use label_gen::{render, render_at, FontSpec, OutputMode, Pt};

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|w| *w == needle)
        .count()
}

/// Number of page objects in a PDF
fn page_objects(pdf: &[u8]) -> usize {
    count(pdf, b"/Type /Page") - count(pdf, b"/Type /Pages")
}

fn addresses(count: usize) -> String {
    (0..count)
        .map(|i| {
            if i % 3 == 0 {
                format!("From:\nSender {i}\n{i} Return Road\nShelbyville")
            } else {
                format!("Recipient {i}\nApartment {i}, 742 Evergreen Terrace\nSpringfield")
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n\n")
}

#[test]
fn empty_paste_renders_a_blank_page() {
    let sheet = render("   \n\n", &LayoutConfig::default(), OutputMode::Preview).unwrap();
    assert!(sheet.bytes.starts_with(b"%PDF-"));
    assert_eq!(sheet.labels, 0);
    assert_eq!(page_objects(&sheet.bytes), 1);
}

#[test]
fn flowing_columns_spill_onto_new_pages() {
    let config = LayoutConfig::default();
    let sheet = render(&addresses(60), &config, OutputMode::Preview).unwrap();
    assert_eq!(sheet.labels, 60);
    assert!(sheet.pages > 1);
    assert_eq!(page_objects(&sheet.bytes), sheet.pages);
}

#[test]
fn grid_sheet_has_one_page_per_full_grid() {
    let config = LayoutConfig::grid(3, 7).with_page_size(PageSize::Letter);
    let sheet = render(&addresses(43), &config, OutputMode::Preview).unwrap();
    assert_eq!(sheet.labels, 43);
    assert_eq!(sheet.pages, 3);
    assert_eq!(page_objects(&sheet.bytes), 3);
    // letter paper
    assert_eq!(count(&sheet.bytes, b"/MediaBox [0 0 612 792]"), 3);
}

#[test]
fn rotated_grid_renders() {
    let mut config = LayoutConfig::grid(4, 3).with_rotation(true);
    config.margins = Margins::all(Pt(20.0));
    let sheet = render(&addresses(12), &config, OutputMode::Preview).unwrap();
    assert_eq!(sheet.labels, 12);
    assert_eq!(page_objects(&sheet.bytes), 1);
}

#[test]
fn generated_sheet_saves_under_its_filename() {
    let dir = tempfile::tempdir().unwrap();
    let now = chrono::Local::now();
    let sheet = render_at(&addresses(5), &LayoutConfig::default(), OutputMode::Generate, now)
        .unwrap();

    let filename = sheet.filename.clone().unwrap();
    assert!(filename.starts_with("address_labels_"));
    assert!(filename.ends_with(".pdf"));

    let path = dir.path().join(&filename);
    std::fs::write(&path, &sheet.bytes).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, sheet.bytes);
    assert!(written.starts_with(b"%PDF-"));
}

#[test]
fn config_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.json");
    std::fs::write(
        &path,
        r#"{
            "strategy": { "kind": "fixed_grid", "columns": 2, "rows": 5 },
            "rotate": true
        }"#,
    )
    .unwrap();

    let config = LayoutConfig::from_json_file(&path).unwrap();
    assert!(config.rotate);
    let sheet = render(&addresses(11), &config, OutputMode::Preview).unwrap();
    assert_eq!(sheet.pages, 2);
}

#[test]
fn font_file_is_embedded() {
    let font = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSansMono.ttf");
    let mut config = LayoutConfig::grid(2, 4);
    config.style.name_font = FontSpec::File(font.clone());
    config.style.body_font = FontSpec::File(font);

    let sheet = render(&addresses(6), &config, OutputMode::Preview).unwrap();
    assert_eq!(sheet.labels, 6);
    assert_eq!(count(&sheet.bytes, b"/FontFile2"), 1);
    assert_eq!(count(&sheet.bytes, b"/Encoding /Identity-H"), 1);
    assert_eq!(count(&sheet.bytes, b"/BaseFont /DejaVuSansMono"), 2);
}
