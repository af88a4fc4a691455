//! Export of themes as static CSS blocks
//!
//! Each selected theme becomes a `.theme-<name>` block and the root theme additionally
//! becomes a `:root` block. Values are resolved with multi-valued entries kept whole,
//! and a source that cannot be fully resolved leaves the last value reached (for a
//! cycle or a missing variable, the `var(...)` that could not be followed).
//!
//! Output only depends on mapping order, selection order and variable order, so the
//! same inputs always give the same bytes.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::error::{ThemeError, ThemeResult};
use crate::export::mapping::VariableMapping;
use crate::resolve::{ResolveMode, Resolver};
use crate::theme::{Theme, ThemeCollection};

/// Validated export inputs
#[derive(Debug, Clone)]
pub struct ExportPlan<'a> {
    pub mapping: &'a VariableMapping,
    pub selected: Vec<&'a Theme>,
    pub root: &'a Theme,
}

impl<'a> ExportPlan<'a> {
    /// Select themes by name, in the given order, with `root` among them
    pub fn new(
        mapping: &'a VariableMapping,
        themes: &'a ThemeCollection,
        selected: &[&str],
        root: &str,
    ) -> ThemeResult<Self> {
        if selected.is_empty() {
            return Err(ThemeError::NoThemesSelected);
        }
        let selected = selected
            .iter()
            .map(|name| {
                themes.get(name).ok_or_else(|| ThemeError::ThemeNotFound {
                    name: name.to_string(),
                })
            })
            .collect::<ThemeResult<Vec<_>>>()?;
        let root = selected
            .iter()
            .copied()
            .find(|theme| theme.name == root)
            .ok_or_else(|| ThemeError::RootThemeNotSelected {
                name: root.to_string(),
            })?;

        Ok(Self {
            mapping,
            selected,
            root,
        })
    }

    /// All themes of the collection, first one as root
    pub fn all(mapping: &'a VariableMapping, themes: &'a ThemeCollection) -> ThemeResult<Self> {
        let names = themes.names();
        let root = names.first().copied().ok_or(ThemeError::NoThemesSelected)?;
        Self::new(mapping, themes, &names, root)
    }
}

/// Generate the export text for a plan over `themes`
pub fn generate(plan: &ExportPlan<'_>, themes: &ThemeCollection) -> String {
    let mut resolver = Resolver::new(themes).with_mode(ResolveMode::Single);
    generate_with(plan, &mut resolver)
}

/// Generate with a caller supplied resolver, which should be in [`ResolveMode::Single`]
pub fn generate_with(plan: &ExportPlan<'_>, resolver: &mut Resolver<'_>) -> String {
    let mut output = String::new();

    for theme in &plan.selected {
        let _ = writeln!(output, "/* {} */", theme.name);
        let _ = writeln!(output, ".{} {{", theme.css_class());
        for (target, source) in plan.mapping.iter() {
            match resolve_source(resolver, theme, source) {
                Some(value) => {
                    let _ = writeln!(output, "  {}: {};", target, value);
                }
                None => {
                    let _ = writeln!(output, "  /* {}: {} not found */", target, source);
                }
            }
        }
        output.push_str("}\n\n");
    }

    output.push_str(":root {\n");
    for (target, source) in plan.mapping.iter() {
        if let Some(value) = resolve_source(resolver, plan.root, source) {
            let _ = writeln!(output, "  {}: {};", target, value);
        }
    }
    output.push_str("}\n");

    log::debug!(
        "Generated export for {} themes, {} mapped variables",
        plan.selected.len(),
        plan.mapping.len()
    );
    output
}

/// Final value of `source` in `theme`, or `None` when the theme does not define it
fn resolve_source(resolver: &mut Resolver<'_>, theme: &Theme, source: &str) -> Option<String> {
    let raw = theme.variable(source)?;
    let chain = resolver.resolve_with(raw, &theme.name, &BTreeSet::new());
    Some(chain.last_value().to_string())
}
