// src/pipeline/filter.rs

//! Search and filtering over an assembled list.
//!
//! A [`FilterEngine`] is built once per list. Filter state is a plain value:
//! every transition (`apply_query`, `apply_axis`, `reset`) returns a new
//! [`FilterState`] and [`FilterEngine::view`] projects a state onto the list.
//!
//! A record is visible when every axis selection is that axis's "all" option
//! or matches the record, and the trimmed query is empty or occurs
//! (case-insensitively) in the record's search text.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::utils::text::locale_cmp;

/// Order of the derived options after the "all" option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOrder {
    /// Case-insensitive ascending
    Ascending,
    /// Descending; used for year axes
    NewestFirst,
}

enum AxisValues<T> {
    /// Options are the distinct values found in the list
    Derived {
        value: fn(&T) -> String,
        unknown: Option<&'static str>,
        order: OptionOrder,
    },
    /// Options are fixed; each has its own predicate
    Fixed {
        options: &'static [&'static str],
        matches: fn(&T, &str) -> bool,
    },
}

/// One categorical filter dimension.
pub struct Axis<T> {
    pub key: &'static str,
    pub label: &'static str,
    /// The option that disables this axis
    pub all: &'static str,
    values: AxisValues<T>,
}

impl<T> Axis<T> {
    /// Axis whose options are the distinct values of `value` over the list.
    pub fn derived(
        key: &'static str,
        label: &'static str,
        all: &'static str,
        value: fn(&T) -> String,
    ) -> Self {
        Self {
            key,
            label,
            all,
            values: AxisValues::Derived {
                value,
                unknown: None,
                order: OptionOrder::Ascending,
            },
        }
    }

    /// Axis with a fixed option list.
    pub fn fixed(
        key: &'static str,
        label: &'static str,
        all: &'static str,
        options: &'static [&'static str],
        matches: fn(&T, &str) -> bool,
    ) -> Self {
        Self {
            key,
            label,
            all,
            values: AxisValues::Fixed { options, matches },
        }
    }

    /// Place `sentinel` last among derived options when present.
    pub fn unknown_last(mut self, sentinel: &'static str) -> Self {
        if let AxisValues::Derived { unknown, .. } = &mut self.values {
            *unknown = Some(sentinel);
        }
        self
    }

    /// Sort derived options newest first.
    pub fn newest_first(mut self) -> Self {
        if let AxisValues::Derived { order, .. } = &mut self.values {
            *order = OptionOrder::NewestFirst;
        }
        self
    }

    /// Options for this axis over `items`, headed by the "all" option.
    pub fn options(&self, items: &[T]) -> Vec<String> {
        let mut options = vec![self.all.to_string()];

        match &self.values {
            AxisValues::Fixed { options: fixed, .. } => {
                options.extend(fixed.iter().map(|o| o.to_string()));
            }
            AxisValues::Derived {
                value,
                unknown,
                order,
            } => {
                let distinct: BTreeSet<String> = items.iter().map(value).collect();
                let has_unknown = unknown.is_some_and(|u| distinct.contains(u));

                let mut known: Vec<String> = distinct
                    .into_iter()
                    .filter(|v| Some(v.as_str()) != *unknown)
                    .collect();
                match order {
                    OptionOrder::Ascending => known.sort_by(|a, b| locale_cmp(a, b)),
                    OptionOrder::NewestFirst => known.sort_by(|a, b| b.cmp(a)),
                }

                options.extend(known);
                if let (true, Some(sentinel)) = (has_unknown, unknown) {
                    options.push(sentinel.to_string());
                }
            }
        }

        options
    }

    /// Whether `item` passes this axis with `selected` chosen.
    pub fn matches(&self, item: &T, selected: &str) -> bool {
        if selected == self.all {
            return true;
        }
        match &self.values {
            AxisValues::Derived { value, .. } => value(item) == selected,
            AxisValues::Fixed { matches, .. } => matches(item, selected),
        }
    }
}

/// A record type that can be searched and filtered.
pub trait Filterable: Sized {
    /// The filter axes offered for this record type, in display order.
    fn axes() -> Vec<Axis<Self>>;

    /// Text the free-text query is matched against.
    fn search_text(&self) -> String;
}

/// Free-text query plus one selection per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    query: String,
    selections: BTreeMap<String, String>,
}

impl FilterState {
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Selected option for `axis`, if the axis exists.
    pub fn selection(&self, axis: &str) -> Option<&str> {
        self.selections.get(axis).map(String::as_str)
    }
}

/// The option list of one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisOptions {
    pub key: String,
    pub label: String,
    pub all: String,
    pub options: Vec<String>,
}

/// Result of projecting a state onto a list.
#[derive(Debug)]
pub struct FilterView<'a, T> {
    pub visible: Vec<&'a T>,
    pub total: usize,
    /// Whether any criterion differs from the default state
    pub has_filters: bool,
}

impl<T> FilterView<'_, T> {
    pub fn shown(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

/// Filter engine bound to one assembled list.
pub struct FilterEngine<'a, T: Filterable> {
    items: &'a [T],
    axes: Vec<Axis<T>>,
    options: Vec<AxisOptions>,
}

impl<'a, T: Filterable> FilterEngine<'a, T> {
    /// Bind the engine to `items` and compute the axis options.
    pub fn new(items: &'a [T]) -> Self {
        let axes = T::axes();
        let options = axes
            .iter()
            .map(|axis| AxisOptions {
                key: axis.key.to_string(),
                label: axis.label.to_string(),
                all: axis.all.to_string(),
                options: axis.options(items),
            })
            .collect();

        Self {
            items,
            axes,
            options,
        }
    }

    pub fn options(&self) -> &[AxisOptions] {
        &self.options
    }

    /// Empty query, every axis on its "all" option.
    pub fn initial_state(&self) -> FilterState {
        FilterState {
            query: String::new(),
            selections: self
                .axes
                .iter()
                .map(|axis| (axis.key.to_string(), axis.all.to_string()))
                .collect(),
        }
    }

    /// Return to the initial state regardless of `_state`.
    pub fn reset(&self, _state: &FilterState) -> FilterState {
        self.initial_state()
    }

    pub fn apply_query(&self, state: &FilterState, query: &str) -> FilterState {
        FilterState {
            query: query.to_string(),
            selections: state.selections.clone(),
        }
    }

    /// Select `value` on `axis`.
    ///
    /// Fails if the axis does not exist or `value` is not one of its options;
    /// the input state is never modified.
    pub fn apply_axis(&self, state: &FilterState, axis: &str, value: &str) -> Result<FilterState> {
        let options = self
            .options
            .iter()
            .find(|o| o.key == axis)
            .ok_or_else(|| AppError::validation(format!("Unknown filter '{axis}'")))?;

        if !options.options.iter().any(|o| o == value) {
            return Err(AppError::validation(format!(
                "'{value}' is not an option for {axis} (expected one of: {})",
                options.options.join(", ")
            )));
        }

        let mut next = state.clone();
        next.selections.insert(axis.to_string(), value.to_string());
        Ok(next)
    }

    /// Whether `item` is visible under `state`.
    pub fn is_visible(&self, item: &T, state: &FilterState) -> bool {
        let axes_match = self.axes.iter().all(|axis| {
            let selected = state.selection(axis.key).unwrap_or(axis.all);
            axis.matches(item, selected)
        });
        if !axes_match {
            return false;
        }

        let query = state.query.trim().to_lowercase();
        query.is_empty() || item.search_text().to_lowercase().contains(&query)
    }

    /// Project `state` onto the list.
    pub fn view(&self, state: &FilterState) -> FilterView<'a, T> {
        let items: &'a [T] = self.items;
        FilterView {
            visible: items
                .iter()
                .filter(|item| self.is_visible(item, state))
                .collect(),
            total: items.len(),
            has_filters: self.has_filters(state),
        }
    }

    fn has_filters(&self, state: &FilterState) -> bool {
        !state.query.trim().is_empty()
            || self.axes.iter().any(|axis| {
                state
                    .selection(axis.key)
                    .is_some_and(|selected| selected != axis.all)
            })
    }
}
