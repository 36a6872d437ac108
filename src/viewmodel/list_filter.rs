//! Named, independent filters over a flat list of records.
//!
//! Every filter selects at most one value out of an option set derived from
//! the unfiltered source. A record is shown when it passes every filter and
//! the free-text filter. Filters are registered with a typed projection;
//! the engine stores them type-erased and recovers the type when a caller
//! updates or inspects one by name.

use crate::error::{FilterErrorKind, Result, WorkbenchError};
use indexmap::IndexMap;
use std::any::{Any, type_name};
use std::fmt;

/// Selection and option set of one filter.
///
/// `selected == None` means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption<T> {
    pub selected: Option<T>,
    pub available: Vec<T>,
}

impl<T> Default for FilterOption<T> {
    fn default() -> Self {
        Self {
            selected: None,
            available: Vec::new(),
        }
    }
}

/// How a filter compares its selection against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The record's single projected value equals the selection
    Equals,
    /// The record's projected collection contains the selection
    Contains,
}

/// Type-erased interface of a registered filter.
pub trait RecordFilter<R>: Any {
    /// Recompute the option set from the unfiltered source.
    fn refresh_available(&mut self, source: &[R]);

    /// Drop the selection.
    fn reset(&mut self);

    fn is_active(&self) -> bool;

    fn matches(&self, record: &R) -> bool;

    /// Current selection and options rendered as text.
    fn describe(&self) -> FilterOption<String>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Projection from a record to the value(s) a filter compares.
enum Projection<R, T> {
    Single(Box<dyn Fn(&R) -> T>),
    Many(Box<dyn Fn(&R) -> Vec<T>>),
}

/// A filter over values of type `T` projected from records of type `R`.
pub struct ValueFilter<R, T> {
    option: FilterOption<T>,
    projection: Projection<R, T>,
}

impl<R, T> ValueFilter<R, T> {
    pub const fn option(&self) -> &FilterOption<T> {
        &self.option
    }

    pub const fn mode(&self) -> MatchMode {
        match self.projection {
            Projection::Single(_) => MatchMode::Equals,
            Projection::Many(_) => MatchMode::Contains,
        }
    }
}

impl<R, T: fmt::Debug> fmt::Debug for ValueFilter<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFilter")
            .field("option", &self.option)
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

impl<R, T> RecordFilter<R> for ValueFilter<R, T>
where
    R: 'static,
    T: Clone + Ord + fmt::Display + 'static,
{
    fn refresh_available(&mut self, source: &[R]) {
        let mut available: Vec<T> = match &self.projection {
            Projection::Single(project) => source.iter().map(project).collect(),
            Projection::Many(project) => source.iter().flat_map(project).collect(),
        };
        available.sort();
        available.dedup();
        self.option.available = available;
    }

    fn reset(&mut self) {
        self.option.selected = None;
    }

    fn is_active(&self) -> bool {
        self.option.selected.is_some()
    }

    fn matches(&self, record: &R) -> bool {
        let Some(selected) = &self.option.selected else {
            return true;
        };
        match &self.projection {
            Projection::Single(project) => project(record) == *selected,
            Projection::Many(project) => project(record).contains(selected),
        }
    }

    fn describe(&self) -> FilterOption<String> {
        FilterOption {
            selected: self.option.selected.as_ref().map(ToString::to_string),
            available: self.option.available.iter().map(ToString::to_string).collect(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Free-text filter state.
struct TextFilter<R> {
    text: String,
    ignore_case: bool,
    fields: Box<dyn Fn(&R) -> Vec<String>>,
}

impl<R> TextFilter<R> {
    /// Substring test on the text as entered; only empty text matches all.
    fn matches(&self, record: &R) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let fields = (self.fields)(record);
        if self.ignore_case {
            let needle = self.text.to_lowercase();
            fields.iter().any(|f| f.to_lowercase().contains(&needle))
        } else {
            fields.iter().any(|f| f.contains(self.text.as_str()))
        }
    }
}

/// Filtered view over a list of records.
///
/// The source is replaced wholesale with [`set_source`](Self::set_source);
/// the filtered view preserves source order.
pub struct ListFilterEngine<R> {
    source: Vec<R>,
    filtered: Vec<usize>,
    filters: IndexMap<String, Box<dyn RecordFilter<R>>>,
    text: Option<TextFilter<R>>,
}

impl<R: 'static> fmt::Debug for ListFilterEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListFilterEngine")
            .field("source_len", &self.source.len())
            .field("filtered_len", &self.filtered.len())
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .field("text", &self.text_filter())
            .finish()
    }
}

impl<R: 'static> Default for ListFilterEngine<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static> ListFilterEngine<R> {
    pub fn new() -> Self {
        Self {
            source: Vec::new(),
            filtered: Vec::new(),
            filters: IndexMap::new(),
            text: None,
        }
    }

    /// Register a filter comparing one projected value per record.
    #[must_use]
    pub fn with_equals_filter<T, F>(self, name: &str, projection: F) -> Self
    where
        T: Clone + Ord + fmt::Display + 'static,
        F: Fn(&R) -> T + 'static,
    {
        self.with_filter(name, Projection::Single(Box::new(projection)))
    }

    /// Register a filter testing membership in a projected collection.
    ///
    /// Records with an empty projection only pass while the filter is
    /// unconstrained.
    #[must_use]
    pub fn with_contains_filter<T, F>(self, name: &str, projection: F) -> Self
    where
        T: Clone + Ord + fmt::Display + 'static,
        F: Fn(&R) -> Vec<T> + 'static,
    {
        self.with_filter(name, Projection::Many(Box::new(projection)))
    }

    fn with_filter<T>(mut self, name: &str, projection: Projection<R, T>) -> Self
    where
        T: Clone + Ord + fmt::Display + 'static,
    {
        let mut filter = ValueFilter {
            option: FilterOption::default(),
            projection,
        };
        filter.refresh_available(&self.source);
        if self.filters.insert(name.to_string(), Box::new(filter)).is_some() {
            tracing::warn!(filter = name, "replaced previously registered filter");
        }
        self
    }

    /// Register the free-text filter with the record fields it searches.
    #[must_use]
    pub fn with_text_filter<F>(mut self, ignore_case: bool, fields: F) -> Self
    where
        F: Fn(&R) -> Vec<String> + 'static,
    {
        self.text = Some(TextFilter {
            text: String::new(),
            ignore_case,
            fields: Box::new(fields),
        });
        self
    }

    /// Replace the source list.
    ///
    /// Option sets are rebuilt from the new source and every selection,
    /// including the text filter, is cleared.
    pub fn set_source(&mut self, items: Vec<R>) {
        self.source = items;
        for filter in self.filters.values_mut() {
            filter.refresh_available(&self.source);
            filter.reset();
        }
        if let Some(text) = &mut self.text {
            text.text.clear();
        }
        self.recompute();
    }

    /// Set the selection of the named filter; `None` removes the constraint.
    ///
    /// Fails if no filter of that name exists or it holds values of
    /// another type.
    pub fn update_filter<T: 'static>(&mut self, name: &str, value: Option<T>) -> Result<()> {
        let filter = self.typed_filter_mut::<T>(name)?;
        filter.option.selected = value;
        self.recompute();
        Ok(())
    }

    /// Set the free-text filter. A no-op for engines without one.
    pub fn update_text_filter(&mut self, text: &str) {
        let Some(filter) = &mut self.text else {
            return;
        };
        text.clone_into(&mut filter.text);
        self.recompute();
    }

    /// Clear every selection and the text without touching option sets.
    pub fn reset_filters(&mut self) {
        for filter in self.filters.values_mut() {
            filter.reset();
        }
        if let Some(text) = &mut self.text {
            text.text.clear();
        }
        self.recompute();
    }

    /// Current option set of the named filter.
    pub fn filter_option<T: 'static>(&self, name: &str) -> Result<&FilterOption<T>> {
        let filter = self
            .filters
            .get(name)
            .ok_or_else(|| unknown_filter(name))?;
        filter
            .as_any()
            .downcast_ref::<ValueFilter<R, T>>()
            .map(ValueFilter::option)
            .ok_or_else(|| type_mismatch::<T>(name))
    }

    fn typed_filter_mut<T: 'static>(&mut self, name: &str) -> Result<&mut ValueFilter<R, T>> {
        let filter = self
            .filters
            .get_mut(name)
            .ok_or_else(|| unknown_filter(name))?;
        filter
            .as_any_mut()
            .downcast_mut::<ValueFilter<R, T>>()
            .ok_or_else(|| type_mismatch::<T>(name))
    }

    /// Names and rendered option sets of every filter, in registration order.
    pub fn describe_filters(&self) -> Vec<(&str, FilterOption<String>)> {
        self.filters
            .iter()
            .map(|(name, filter)| (name.as_str(), filter.describe()))
            .collect()
    }

    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Number of constrained filters, counting a non-empty text filter.
    pub fn active_filter_count(&self) -> usize {
        let text_active = self.text.as_ref().is_some_and(|t| !t.text.is_empty());
        self.filters.values().filter(|f| f.is_active()).count() + usize::from(text_active)
    }

    pub fn text_filter(&self) -> &str {
        self.text.as_ref().map_or("", |t| t.text.as_str())
    }

    pub fn source(&self) -> &[R] {
        &self.source
    }

    /// Records passing every filter, in source order.
    pub fn filtered_items(&self) -> impl Iterator<Item = &R> {
        self.filtered.iter().map(|&i| &self.source[i])
    }

    /// Source positions of the filtered records.
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    fn recompute(&mut self) {
        let filters = &self.filters;
        let text = self.text.as_ref();
        self.filtered = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                filters.values().all(|f| f.matches(record))
                    && text.is_none_or(|t| t.matches(record))
            })
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            source = self.source.len(),
            filtered = self.filtered.len(),
            "recomputed filtered list"
        );
    }
}

fn unknown_filter(name: &str) -> WorkbenchError {
    WorkbenchError::filter(
        "looking up filter",
        FilterErrorKind::UnknownFilter(name.to_string()),
    )
}

fn type_mismatch<T>(name: &str) -> WorkbenchError {
    WorkbenchError::filter(
        "looking up filter",
        FilterErrorKind::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>(),
        },
    )
}
