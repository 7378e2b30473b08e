use super::tracing_config::{LogFormat, LogSettings};

#[test]
fn format_names_are_case_insensitive() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
}

#[test]
fn unknown_format_falls_back_to_text() {
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
}

#[test]
fn nothing_is_installed_without_a_filter() {
    assert_eq!(LogSettings::from_values(None, None, Some("tree")), None);
}

#[test]
fn own_variable_wins_over_the_fallback() {
    let settings = LogSettings::from_values(
        Some("slice2ts_binder=trace".to_string()),
        Some("warn".to_string()),
        Some("tree"),
    );

    assert_eq!(
        settings,
        Some(LogSettings {
            directives: "slice2ts_binder=trace".to_string(),
            format: LogFormat::Tree,
        })
    );
}

#[test]
fn fallback_filter_uses_the_default_format() {
    let settings = LogSettings::from_values(None, Some("debug".to_string()), None)
        .expect("RUST_LOG alone enables logging");

    assert_eq!(settings.directives, "debug");
    assert_eq!(settings.format, LogFormat::Text);
}
