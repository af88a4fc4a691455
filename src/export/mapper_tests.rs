use crate::error::ThemeError;
use crate::export::{generate, ExportPlan, VariableMapping};
use crate::test_utils::{collection, theme};
use crate::theme::ThemeCollection;

fn brand_themes() -> ThemeCollection {
    collection(vec![
        theme(
            "Light Mode",
            &[
                ("--brand", "#3b82f6"),
                ("--primary", "var(--brand)"),
                ("--bg", "#ffffff"),
                ("--gap", "4px | 1rem"),
            ],
        ),
        theme(
            "Dark",
            &[
                ("--primary", "var(--accent)"),
                ("--bg", "var(--bg)"),
                ("--gap", "var(--gap-list)"),
                ("--gap-list", "2px | 8px"),
            ],
        ),
    ])
}

fn mapping() -> VariableMapping {
    VariableMapping::parse(
        r#"{ "--color-primary": "--primary", "--background": "--bg", "--spacing": "--gap", "--color-info": "--info" }"#,
    )
    .unwrap()
}

#[test]
fn test_export_output() {
    let themes = brand_themes();
    let mapping = mapping();
    let plan = ExportPlan::new(&mapping, &themes, &["Light Mode", "Dark"], "Light Mode").unwrap();

    let expected = "\
/* Light Mode */
.theme-light-mode {
  --color-primary: #3b82f6;
  --background: #ffffff;
  --spacing: 4px | 1rem;
  /* --color-info: --info not found */
}

/* Dark */
.theme-dark {
  --color-primary: var(--accent);
  --background: var(--bg);
  --spacing: 2px | 8px;
  /* --color-info: --info not found */
}

:root {
  --color-primary: #3b82f6;
  --background: #ffffff;
  --spacing: 4px | 1rem;
}
";
    assert_eq!(generate(&plan, &themes), expected);
}

#[test]
fn test_missing_source_is_a_comment() {
    let themes = collection(vec![theme("A", &[("--bg", "#fff")])]);
    let mapping = VariableMapping::parse(r#"{ "--primary": "--color-primary" }"#).unwrap();
    let plan = ExportPlan::new(&mapping, &themes, &["A"], "A").unwrap();

    let output = generate(&plan, &themes);
    assert!(output.contains("  /* --primary: --color-primary not found */\n"));
    assert!(output.ends_with(":root {\n}\n"));
}

#[test]
fn test_selection_order_is_kept() {
    let themes = brand_themes();
    let mapping = mapping();
    let plan = ExportPlan::new(&mapping, &themes, &["Dark", "Light Mode"], "Dark").unwrap();

    let output = generate(&plan, &themes);
    let dark = output.find("/* Dark */").unwrap();
    let light = output.find("/* Light Mode */").unwrap();
    assert!(dark < light);
    assert!(output.contains(":root {\n  --color-primary: var(--accent);\n"));
}

#[test]
fn test_output_is_reproducible() {
    let themes = brand_themes();
    let mapping = mapping();
    let plan = ExportPlan::all(&mapping, &themes).unwrap();
    assert_eq!(plan.root.name, "Light Mode");
    assert_eq!(generate(&plan, &themes), generate(&plan, &themes.clone()));
}

#[test]
fn test_plan_validation() {
    let themes = brand_themes();
    let mapping = mapping();

    assert!(matches!(
        ExportPlan::new(&mapping, &themes, &[], "Dark"),
        Err(ThemeError::NoThemesSelected)
    ));
    assert!(matches!(
        ExportPlan::new(&mapping, &themes, &["Nope"], "Nope"),
        Err(ThemeError::ThemeNotFound { .. })
    ));
    assert!(matches!(
        ExportPlan::new(&mapping, &themes, &["Dark"], "Light Mode"),
        Err(ThemeError::RootThemeNotSelected { .. })
    ));
    assert!(matches!(
        ExportPlan::all(&mapping, &ThemeCollection::new()),
        Err(ThemeError::NoThemesSelected)
    ));
}

#[test]
fn test_cycle_exports_last_value_before_repeat() {
    let themes = collection(vec![theme("A", &[("--a", "var(--b)"), ("--b", "var(--a)")])]);
    let mapping = VariableMapping::parse(r#"{ "--out": "--a" }"#).unwrap();
    let plan = ExportPlan::new(&mapping, &themes, &["A"], "A").unwrap();

    let output = generate(&plan, &themes);
    assert!(output.contains(".theme-a {\n  --out: var(--b);\n}\n"));
    assert!(output.ends_with(":root {\n  --out: var(--b);\n}\n"));
}

#[test]
fn test_self_reference_exports_itself() {
    let themes = collection(vec![theme("A", &[("--x", "var(--x)")])]);
    let mapping = VariableMapping::parse(r#"{ "--out": "--x" }"#).unwrap();
    let plan = ExportPlan::new(&mapping, &themes, &["A"], "A").unwrap();

    assert!(generate(&plan, &themes).contains("  --out: var(--x);\n"));
}

#[test]
fn test_empty_mapping_object_exports_empty_blocks() {
    let themes = brand_themes();
    let mapping = VariableMapping::parse("{}").unwrap();
    let plan = ExportPlan::new(&mapping, &themes, &["Dark"], "Dark").unwrap();

    assert_eq!(generate(&plan, &themes), "/* Dark */\n.theme-dark {\n}\n\n:root {\n}\n");
}
