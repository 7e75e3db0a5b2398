/// Produces the text value stored for a 1-based row number.
///
/// Implementations must be deterministic: the same row number always yields
/// the same value.
pub trait RowValueGenerator {
    fn value_for(&self, row_number: u64) -> String;

    /// Expected length of a generated value, used only to reserve statement
    /// buffer capacity up front. Buffers still grow past it when a value is
    /// longer.
    fn value_len_hint(&self, last_row_number: u64) -> usize {
        self.value_for(last_row_number).len()
    }
}

impl<F> RowValueGenerator for F
where
    F: Fn(u64) -> String,
{
    fn value_for(&self, row_number: u64) -> String {
        self(row_number)
    }
}

/// `<prefix><row_number>` labels, `User_1`, `User_2`, ... by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedLabel {
    prefix: String,
}

impl PrefixedLabel {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for PrefixedLabel {
    fn default() -> Self {
        Self::new("User_")
    }
}

impl RowValueGenerator for PrefixedLabel {
    fn value_for(&self, row_number: u64) -> String {
        format!("{}{row_number}", self.prefix)
    }
}
