use csv::StringRecord;

/// The fields every source row must carry, in canonical order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "transaction_id",
    "timestamp",
    "account_id",
    "amount",
    "currency",
    "merchant",
    "category",
    "country",
];

/// A single source row exactly as read, keyed by header name.
///
/// Field order follows the source header. Nothing here is validated; a row
/// shorter than the header still carries every header field, left empty.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Builds a record from a CSV row. Missing trailing cells come back as
    /// empty values; values beyond the header are kept under positional names
    /// (`column_<n>`, 1-based).
    pub fn from_csv(headers: &StringRecord, row: &StringRecord) -> Self {
        let named = headers.iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), row.get(index).unwrap_or_default().to_string()));

        let extras = row.iter()
            .enumerate()
            .skip(headers.len())
            .map(|(index, value)| (format!("column_{}", index + 1), value.to_string()));

        Self {
            fields: named.chain(extras).collect()
        }
    }

    #[cfg(test)]
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing an existing value in place.
    #[cfg(test)]
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(field, _)| field.as_str())
    }

    /// Values for `names` in that order; absent fields come back empty.
    pub fn values_for<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = &'a str> {
        names.iter().map(|name| self.get(name).unwrap_or(""))
    }
}
