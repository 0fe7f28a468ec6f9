//! Ordered field mapping.
//!
//! Placeholders bind to a family's field table purely by document order:
//! the placeholder with `order == k` takes the entry with `order == k`.
//! Placeholders past the end of the table (or in an unclassified document)
//! get a synthetic `Placeholder k` binding. Missing data never fails; the
//! binding carries a bracketed label and `missing = true`.

mod builtin;
mod registry;
pub mod rules;

use chrono::{Local, NaiveDate};
use lts_model::{Category, DataRecord, FieldRef, Placeholder, PlaceholderId, TemplateFamily};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::utils::to_snake_case;

pub use registry::MappingRegistry;
pub use rules::EvalContext;

/// Default currency suffix for computed amounts.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Association of one placeholder with a field and its computed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binding {
    pub placeholder: PlaceholderId,
    pub order: u32,
    pub description: String,
    /// `None` for synthetic bindings past the end of the table.
    pub field: Option<FieldRef>,
    pub category: Category,
    /// Computed value, or the bracketed label when `missing`.
    pub value: String,
    pub missing: bool,
}

impl Binding {
    fn synthetic(placeholder: &Placeholder) -> Self {
        let description = format!("Placeholder {}", placeholder.order);
        Self {
            placeholder: placeholder.id.clone(),
            order: placeholder.order,
            value: format!("[{description}]"),
            description,
            field: None,
            category: placeholder.category,
            missing: true,
        }
    }

    /// True when the binding came from a field table.
    pub fn is_mapped(&self) -> bool {
        self.field.is_some()
    }

    /// Variable name used when templatizing: the snake_cased field key, the
    /// snake_cased description for calculated fields, else `placeholder_k`.
    pub fn variable_name(&self) -> String {
        let derived = match &self.field {
            Some(FieldRef::Named(key)) => to_snake_case(key),
            Some(FieldRef::Calculated) => to_snake_case(&self.description),
            None => None,
        };
        derived.unwrap_or_else(|| format!("placeholder_{}", self.order))
    }

    /// Records this binding on the matching placeholder.
    ///
    /// Returns `false` when no placeholder carries the binding's id.
    pub fn apply_to(&self, placeholders: &mut [Placeholder]) -> bool {
        let Some(target) = placeholders.iter_mut().find(|ph| ph.id == self.placeholder) else {
            return false;
        };
        target.value = self.value.clone();
        target.filled = !self.missing;
        target.description = self.description.clone();
        target.category = self.category;
        true
    }
}

/// Binds placeholders to a family's field table.
#[derive(Debug, Clone)]
pub struct FieldMapper<'a> {
    registry: &'a MappingRegistry,
    context: EvalContext,
}

impl Default for FieldMapper<'static> {
    fn default() -> Self {
        Self::new(MappingRegistry::builtin())
    }
}

impl<'a> FieldMapper<'a> {
    /// Creates a mapper evaluating against today's local date.
    pub fn new(registry: &'a MappingRegistry) -> Self {
        Self {
            registry,
            context: EvalContext {
                today: Local::now().date_naive(),
                currency: DEFAULT_CURRENCY.to_string(),
            },
        }
    }

    /// Creates a mapper using the configured date and currency.
    pub fn from_config(registry: &'a MappingRegistry, config: &EngineConfig) -> Self {
        Self::new(registry)
            .with_today(config.evaluation_date())
            .with_currency(config.currency.clone())
    }

    /// Pins the evaluation date used by `today` rules.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.context.today = today;
        self
    }

    /// Sets the default currency suffix.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.context.currency = currency.into();
        self
    }

    pub fn registry(&self) -> &'a MappingRegistry {
        self.registry
    }

    /// Binds every placeholder, in order, to `family`'s table.
    pub fn bind(
        &self,
        placeholders: &[Placeholder],
        family: Option<TemplateFamily>,
        record: &DataRecord,
    ) -> Vec<Binding> {
        let bindings: Vec<Binding> = placeholders
            .iter()
            .map(|placeholder| self.bind_one(placeholder, family, record))
            .collect();

        let missing = bindings.iter().filter(|binding| binding.missing).count();
        tracing::debug!(
            family = ?family,
            placeholders = placeholders.len(),
            missing,
            "bound placeholders"
        );
        bindings
    }

    /// Binds and records the values on `placeholders`.
    pub fn fill_placeholders(
        &self,
        placeholders: &mut [Placeholder],
        family: Option<TemplateFamily>,
        record: &DataRecord,
    ) -> Vec<Binding> {
        let bindings = self.bind(placeholders, family, record);
        for binding in &bindings {
            binding.apply_to(placeholders);
        }
        bindings
    }

    fn bind_one(
        &self,
        placeholder: &Placeholder,
        family: Option<TemplateFamily>,
        record: &DataRecord,
    ) -> Binding {
        let Some(mapping) = family.and_then(|family| self.registry.mapping(family, placeholder.order))
        else {
            return Binding::synthetic(placeholder);
        };

        let computed = rules::evaluate(&mapping.rule, record, &self.context);
        if computed.is_none() {
            tracing::trace!(order = placeholder.order, field = %mapping.description, "no data for field");
        }
        Binding {
            placeholder: placeholder.id.clone(),
            order: placeholder.order,
            description: mapping.description.clone(),
            field: Some(mapping.field.clone()),
            category: mapping.category,
            missing: computed.is_none(),
            value: computed.unwrap_or_else(|| mapping.missing_label()),
        }
    }
}
