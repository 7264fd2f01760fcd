use chrono::NaiveDate;

/// Source of the current calendar date.
///
/// Enrollment deadlines and invitation response dates depend on "today",
/// so the engines read it from this port rather than the ambient system
/// clock. Production wires in a real clock; tests pin the date.
pub trait Clock: Send + Sync {
    /// The current date, at day granularity.
    fn today(&self) -> NaiveDate;
}
