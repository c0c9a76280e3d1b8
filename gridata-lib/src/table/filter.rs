//! Column filter protocol.
//!
//! Each column independently owns a small filter form, hosted in a popover.
//! The host exposes exactly one capability, [`Popover::close`], passed
//! explicitly to the form rather than looked up from ambient context. At
//! most one popover is open at a time; submitting or resetting a column's
//! filter closes its popover.

use crate::api::query::Comparison;
use crate::api::query::FilterValue;
use crate::api::query::SimpleFilter;
use crate::error::Error;
use crate::error::ValidationError;
use crate::table::ViewState;

/// The capability a filter form needs from its popover host.
pub trait Popover {
    /// Closes the popover hosting the form.
    fn close(&mut self);
}

type Parser<I> = Box<dyn Fn(&I) -> Vec<String> + Send + Sync>;
type Validator<I> = Box<dyn Fn(&I) -> Result<(), ValidationError> + Send + Sync>;
type SubmitHook = Box<dyn FnMut(&[String]) + Send>;

/// A per-column filter form.
///
/// Any form whose submit produces a predicate fragment list fits this shape:
/// the built-in [`SimpleFilter`] parser and fully custom parsers share the
/// `Fn(&I) -> Vec<String>` seam.
///
/// # Example
///
/// ```
/// use gridata_lib::api::query::Comparison;
/// use gridata_lib::table::{ColumnFilter, Popover, ViewState};
///
/// struct Host {
///     open: bool,
/// }
/// impl Popover for Host {
///     fn close(&mut self) {
///         self.open = false;
///     }
/// }
///
/// let mut filter = ColumnFilter::simple("name", "name", Comparison::Contains);
/// let state = ViewState::new(25);
/// let mut host = Host { open: true };
///
/// let next = filter.submit(&Some("bob".into()), &state, &mut host).unwrap();
/// assert_eq!(next.filters["name"], vec!["contains(name, 'bob')"]);
/// assert!(!host.open);
/// ```
pub struct ColumnFilter<I> {
    column: String,
    parser: Parser<I>,
    validator: Option<Validator<I>>,
    on_submit: Option<SubmitHook>,
}

impl<I> ColumnFilter<I> {
    /// Creates a filter form for a column with the given parser.
    pub fn new(
        column: impl Into<String>,
        parser: impl Fn(&I) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            column: column.into(),
            parser: Box::new(parser),
            validator: None,
            on_submit: None,
        }
    }

    /// Attaches a validator run before parsing. A validation failure blocks
    /// the submission entirely.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&I) -> Result<(), ValidationError> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Attaches a callback invoked with the parsed fragments on each
    /// successful submit.
    pub fn with_on_submit(mut self, hook: impl FnMut(&[String]) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(hook));
        self
    }

    /// The column this form filters.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Submits the form.
    ///
    /// Validates the input, parses it into predicate fragments, installs the
    /// fragment list as the column's filter value, fires the submit
    /// callback, and closes the popover. Returns the reconciled state, with
    /// the page index reset whenever the filter set actually changed.
    ///
    /// On validation failure nothing happens: the state is untouched and the
    /// popover stays open.
    pub fn submit(
        &mut self,
        input: &I,
        state: &ViewState,
        popover: &mut dyn Popover,
    ) -> Result<ViewState, Error> {
        if let Some(validator) = &self.validator {
            validator(input)?;
        }

        let fragments = (self.parser)(input);
        let mut next = state.clone();
        next.filters.insert(self.column.clone(), fragments.clone());

        if let Some(hook) = &mut self.on_submit {
            hook(&fragments);
        }
        popover.close();

        Ok(state.reconcile(next))
    }

    /// Resets the form: removes the column's filter entry entirely (no
    /// predicate from this column, as opposed to an installed empty list)
    /// and closes the popover. Returns the reconciled state.
    pub fn reset(&mut self, state: &ViewState, popover: &mut dyn Popover) -> ViewState {
        let mut next = state.clone();
        next.filters.remove(&self.column);
        popover.close();
        state.reconcile(next)
    }
}

impl ColumnFilter<Option<FilterValue>> {
    /// Builds a column filter around the built-in simple parser: one
    /// comparison over one field, empty input producing no fragment.
    pub fn simple(
        column: impl Into<String>,
        prop: impl Into<String>,
        comparison: Comparison,
    ) -> Self {
        let filter = SimpleFilter::new(prop, comparison);
        Self::new(column, move |value: &Option<FilterValue>| {
            filter.parse(value.as_ref())
        })
    }
}
