//! Loading themes from disk.

use std::io::Write;

use trellis_style::{Error, Theme, ThemeMode};

#[test]
fn test_load_partial_theme_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r##"
mode = "dark"

[sizes]
padding = 8.0
text_size = 12.0

[colors]
button = "#102030"
"##
    )
    .unwrap();

    let theme = Theme::load(file.path()).unwrap();
    assert_eq!(theme.mode, ThemeMode::Dark);
    assert_eq!(theme.padding(), 8.0);
    assert_eq!(theme.text_size(), 12.0);
    assert_eq!(theme.inline_icon_size(), Theme::dark().inline_icon_size());
    assert_eq!(theme.palette.foreground, Theme::dark().palette.foreground);
    assert_ne!(theme.palette.button, Theme::dark().palette.button);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Theme::load(&path).unwrap_err();
    match err {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}
